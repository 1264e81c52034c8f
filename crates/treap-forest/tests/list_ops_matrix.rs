use treap_forest::{AddDelta, ListError, SumMax, TreapList, TreapNumList};

fn num_list(values: &[i64]) -> TreapNumList {
    let mut list = TreapNumList::with_seed(42);
    for &v in values {
        list.push_back(v);
    }
    list
}

#[test]
fn front_inserts_reverse_arrival_order() {
    let mut list = TreapNumList::with_seed(1);
    for v in [5, 3, 8, 1] {
        list.insert(0, v).unwrap();
    }
    assert_eq!(list.to_vec(), vec![1, 8, 3, 5]);
    assert_eq!(list.summary(..).unwrap().map(|s| s.max), Some(8));
    list.check().unwrap();
}

#[test]
fn range_add_then_full_reverse() {
    let mut list = num_list(&[1, 2, 3, 4, 5]);
    list.update(1..4, AddDelta(10)).unwrap();
    assert_eq!(list.to_vec(), vec![1, 12, 13, 14, 5]);
    list.reverse(..).unwrap();
    assert_eq!(list.to_vec(), vec![5, 14, 13, 12, 1]);
    list.check().unwrap();
}

#[test]
fn remove_returns_payload_and_updates_max() {
    let mut list = num_list(&[1, 8, 3, 5]);
    assert_eq!(list.remove(1), Ok(8));
    assert_eq!(list.to_vec(), vec![1, 3, 5]);
    assert_eq!(list.summary(..).unwrap().map(|s| s.max), Some(5));
    assert_eq!(list.len(), 3);
    list.check().unwrap();
}

#[test]
fn split_off_then_append_restores_sequence() {
    let mut list = num_list(&[10, 20, 30, 40, 50, 60]);
    let mut tail = list.split_off(3).unwrap();
    assert_eq!(list.to_vec(), vec![10, 20, 30]);
    assert_eq!(tail.to_vec(), vec![40, 50, 60]);
    list.check().unwrap();
    tail.check().unwrap();

    list.append(&mut tail);
    assert_eq!(list.to_vec(), vec![10, 20, 30, 40, 50, 60]);
    assert!(tail.is_empty());
    assert_eq!(tail.len(), 0);
    list.check().unwrap();
    tail.check().unwrap();
}

#[test]
fn sum_and_max_over_subranges() {
    let mut list = num_list(&[4, -1, 7, 0, 2]);
    assert_eq!(list.summary(1..4).unwrap(), Some(SumMax { sum: 6, max: 7 }));
    assert_eq!(list.summary(..).unwrap(), Some(SumMax { sum: 12, max: 7 }));
    assert_eq!(list.summary(2..=2).unwrap(), Some(SumMax { sum: 7, max: 7 }));
    assert_eq!(list.summary(3..3).unwrap(), None);
    // Reads leave the sequence intact.
    assert_eq!(list.to_vec(), vec![4, -1, 7, 0, 2]);
    list.check().unwrap();
}

#[test]
fn get_sees_pending_tags_without_mutation() {
    let mut list = num_list(&[1, 2, 3, 4, 5, 6, 7, 8]);
    list.update(2..7, AddDelta(100)).unwrap();
    list.reverse(1..6).unwrap();
    let snapshot = list.to_vec();
    for pos in 0..list.len() {
        assert_eq!(list.get(pos), Some(snapshot[pos]));
    }
    assert_eq!(list.get(list.len()), None);
    assert_eq!(list.first(), snapshot.first().copied());
    assert_eq!(list.last(), snapshot.last().copied());
    list.check().unwrap();
}

#[test]
fn double_reversal_restores_sequence() {
    let mut list = num_list(&[9, 4, 6, 1, 7, 3]);
    list.reverse(1..=4).unwrap();
    list.reverse(1..=4).unwrap();
    assert_eq!(list.to_vec(), vec![9, 4, 6, 1, 7, 3]);
    list.check().unwrap();
}

#[test]
fn two_adds_equal_one_combined_add() {
    let mut a = num_list(&[3, 1, 4, 1, 5, 9]);
    let mut b = num_list(&[3, 1, 4, 1, 5, 9]);
    a.update(1..5, AddDelta(7)).unwrap();
    a.update(1..5, AddDelta(-2)).unwrap();
    b.update(1..5, AddDelta(5)).unwrap();
    assert_eq!(a.to_vec(), b.to_vec());
    a.check().unwrap();
}

#[test]
fn out_of_range_operands_are_rejected_up_front() {
    let mut list = num_list(&[1, 2, 3]);
    assert_eq!(
        list.insert(4, 0),
        Err(ListError::PositionOutOfBounds { pos: 4, len: 3 })
    );
    assert_eq!(
        list.remove(3),
        Err(ListError::PositionOutOfBounds { pos: 3, len: 3 })
    );
    assert_eq!(
        list.update(1..5, AddDelta(1)),
        Err(ListError::RangeOutOfBounds {
            start: 1,
            end: 5,
            len: 3
        })
    );
    assert_eq!(
        list.reverse(2..1),
        Err(ListError::RangeOutOfBounds {
            start: 2,
            end: 1,
            len: 3
        })
    );
    assert!(list.split_off(4).is_err());
    // The sequence is untouched after every rejection.
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    list.check().unwrap();
}

#[test]
fn empty_list_edge_cases() {
    let mut list = TreapNumList::with_seed(5);
    assert!(list.is_empty());
    assert_eq!(list.to_vec(), Vec::<i64>::new());
    assert_eq!(list.get(0), None);
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.summary(..).unwrap(), None);
    list.update(.., AddDelta(1)).unwrap();
    list.reverse(..).unwrap();
    list.check().unwrap();
}

#[test]
fn clear_resets_arena_and_length() {
    let mut list = num_list(&[1, 2, 3]);
    list.clear();
    assert!(list.is_empty());
    list.push_back(10);
    list.push_front(9);
    assert_eq!(list.to_vec(), vec![9, 10]);
    list.check().unwrap();
}

#[test]
fn ladder_against_vec_model() {
    let mut list = TreapNumList::with_seed(7);
    let mut model: Vec<i64> = Vec::new();

    // Deterministic pseudo-random op stream.
    let mut state = 0x9e3779b97f4a7c15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for step in 0..600 {
        let r = next();
        let len = model.len();
        match r % 5 {
            0 | 1 => {
                let pos = (r >> 8) as usize % (len + 1);
                let v = (r >> 32) as i64 % 1000;
                list.insert(pos, v).unwrap();
                model.insert(pos, v);
            }
            2 if len > 0 => {
                let pos = (r >> 8) as usize % len;
                assert_eq!(list.remove(pos), Ok(model.remove(pos)));
            }
            3 if len > 0 => {
                let a = (r >> 8) as usize % len;
                let b = (r >> 24) as usize % len;
                let (l, h) = (a.min(b), a.max(b));
                let delta = (r >> 40) as i64 % 50;
                list.update(l..=h, AddDelta(delta)).unwrap();
                for v in &mut model[l..=h] {
                    *v += delta;
                }
            }
            4 if len > 0 => {
                let a = (r >> 8) as usize % len;
                let b = (r >> 24) as usize % len;
                let (l, h) = (a.min(b), a.max(b));
                list.reverse(l..=h).unwrap();
                model[l..=h].reverse();
            }
            _ => {}
        }
        if step % 50 == 0 {
            assert_eq!(list.to_vec(), model);
            list.check().unwrap();
        }
        assert_eq!(list.len(), model.len());
    }

    assert_eq!(list.to_vec(), model);
    if !model.is_empty() {
        let expected = SumMax {
            sum: model.iter().sum(),
            max: *model.iter().max().unwrap(),
        };
        assert_eq!(list.summary(..).unwrap(), Some(expected));
    }
    list.check().unwrap();
}

#[test]
fn generic_payloads_work_without_aggregates() {
    use treap_forest::{NoSummary, NoUpdate};

    let mut list: TreapList<String, NoSummary, NoUpdate> =
        ["b", "c"].into_iter().map(String::from).collect();
    list.push_front("a".to_string());
    list.reverse(..).unwrap();
    assert_eq!(list.to_vec(), vec!["c", "b", "a"]);
    assert_eq!(list.get(1).as_deref(), Some("b"));
    list.check().unwrap();
}
