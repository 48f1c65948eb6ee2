use ringdeque::{algo, CircularBuffer, Error, GrowableBuffer, RingBuffer, DEFAULT_CAPACITY};

fn concat<'a, I: IntoIterator<Item = &'a String>>(iter: I) -> String {
    iter.into_iter().map(|s| s.as_str()).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// The same queue scenario must hold for both buffer types.
macro_rules! queue_scenario {
    ($name:ident, $ty:ident) => {
        #[test]
        fn $name() {
            let mut buf: $ty<&str> = $ty::with_capacity(3);
            buf.push_back("a");
            buf.push_back("b");
            buf.push_back("c");
            assert_eq!(buf.front(), Some(&"a"));
            assert_eq!(buf.back(), Some(&"c"));
            assert_eq!(buf.pop_front(), Ok("a"));
            assert_eq!(buf.front(), Some(&"b"));
        }
    };
}

queue_scenario!(scenario_a_fixed, CircularBuffer);
queue_scenario!(scenario_a_growable, GrowableBuffer);

#[test]
fn scenario_b_eviction() {
    let mut buf: CircularBuffer<&str> = CircularBuffer::with_capacity(2);
    assert_eq!(buf.push_back("x"), None);
    assert_eq!(buf.push_back("y"), None);
    assert_eq!(buf.push_back("z"), Some("x"));
    assert_eq!(buf, ["y", "z"]);
}

#[test]
fn scenario_c_erase() {
    let mut fixed = CircularBuffer::from(["A", "B", "C", "D"]);
    assert_eq!(fixed.remove(2), Ok("C"));
    assert_eq!(fixed, ["A", "B", "D"]);

    let mut growable: GrowableBuffer<_> = GrowableBuffer::from(["A", "B", "C", "D"]);
    assert_eq!(growable.cursor_mut(2).remove(), Ok("C"));
    assert_eq!(growable, ["A", "B", "D"]);
}

#[test]
fn scenario_d_equality() {
    let a = CircularBuffer::from([1, 2, 3]);
    let mut b = CircularBuffer::from([1, 2, 3]);
    assert_eq!(a, b);
    assert_eq!(b.pop_back(), Ok(3));
    assert_eq!(b.push_back(4), None);
    assert_ne!(a, b);
}

#[test]
fn construction() {
    let a: CircularBuffer<f32> = CircularBuffer::with_capacity(2);
    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 2);

    let b: CircularBuffer<String> = CircularBuffer::from_elem(3, "abc".to_string());
    assert_eq!(b.len(), 3);
    assert_eq!(b.capacity(), 3);
    let mut it = b.begin();
    while it < b.end() {
        assert_eq!(it.get().map(|s| s.as_str()), Some("abc"));
        it += 1;
    }

    let c = CircularBuffer::from(strings(&["abc", "abc", "abc"]));
    assert_eq!(b, c);

    let d: CircularBuffer<i32> = CircularBuffer::new();
    assert_eq!(d.capacity(), DEFAULT_CAPACITY);
    assert_eq!(d.len(), 0);
    let e: GrowableBuffer<i32> = GrowableBuffer::default();
    assert_eq!(e.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn copy_compares_equal() {
    let a = CircularBuffer::from([1, 2, 3]);
    let b = a.clone();
    assert!(a == b);
}

#[test]
fn sort_fixed_after_front_eviction() {
    let a: CircularBuffer<String> = CircularBuffer::from_elem(5, "abc".to_string());
    let mut b: CircularBuffer<i32> = CircularBuffer::with_capacity(3);
    b.push_front(1);
    b.push_front(4);
    b.push_front(5);
    b.push_front(3);

    algo::sort(&mut b);

    assert!(a.iter().all(|s| s == "abc"));
    let mut n = 0;
    let mut it = b.begin();
    while it < b.end() {
        assert_eq!(it.get(), [3, 4, 5].get(n));
        it.move_next();
        n += 1;
    }
    assert_eq!(n, 3);
}

#[test]
fn sort_strings() {
    let mut a: CircularBuffer<String> = CircularBuffer::with_capacity(3);
    a.push_back("ABC".to_string());
    a.push_back("CBA".to_string());
    a.push_back("BAC".to_string());

    algo::sort(&mut a);

    let sorted = ["ABC", "BAC", "CBA"];
    for i in 0..a.len() {
        assert_eq!(a[i], sorted[i]);
    }
}

#[test]
fn get_operators() {
    let mut a: CircularBuffer<String> = CircularBuffer::new();
    a.push_back("BEG".to_string());
    a.push_back("END".to_string());

    assert_eq!(a.begin().get().map(|s| s.as_str()), Some("BEG"));
    assert_eq!(a.front().map(|s| s.as_str()), Some("BEG"));
    assert_eq!(a.back().map(|s| s.as_str()), Some("END"));
}

#[test]
fn reserve_keeps_size() {
    let mut a = CircularBuffer::from(strings(&[
        "I", "Walk", "this", "empty", "street", "on", "the Boulevard of Broken dreams",
    ]));
    a.reserve(12).unwrap();
    assert_eq!(a.len(), 7);
    assert_eq!(a.capacity(), 12);
    assert_eq!(a[6], "the Boulevard of Broken dreams");
}

#[test]
fn push_back_in_order() {
    let words = ["Where", "the", "city", "sleeps", "I walk", "alone"];
    let are = CircularBuffer::from(words);
    let mut it = are.begin();
    for word in words.iter() {
        assert_eq!(it.get(), Some(word));
        it += 1;
    }
    assert!(it.is_end());
}

#[test]
fn push_front_on_full() {
    let mut a = CircularBuffer::from(["Walk", "this", "empty", "street", "on", "Boulevard"]);
    let mut b = CircularBuffer::from([1, 2, 1]);

    assert_eq!(a.push_front("New start!"), Some("Boulevard"));
    assert_eq!(b.push_front(0), Some(1));

    assert_eq!(a.front(), Some(&"New start!"));
    assert_eq!(b.front(), Some(&0));
    assert_eq!(b, [0, 1, 2]);
}

#[test]
fn pop_back_and_front() {
    let mut a = CircularBuffer::from(["Walk", "this", "on", "Back_value", "This is end..."]);
    let mut b = CircularBuffer::from([0, 1, 2, 3, 4]);
    assert_eq!(a.pop_back(), Ok("This is end..."));
    assert_eq!(b.pop_back(), Ok(4));
    assert_eq!(a.back(), Some(&"Back_value"));
    assert_eq!(b.back(), Some(&3));

    let mut c = CircularBuffer::from(["12", "Front_value", "Walk"]);
    assert_eq!(c.pop_front(), Ok("12"));
    assert_eq!(b.pop_front(), Ok(0));
    assert_eq!(c.front(), Some(&"Front_value"));
    assert_eq!(b.front(), Some(&1));
}

#[test]
fn growable_insert_n_at_begin() {
    let mut k = GrowableBuffer::from(strings(&["a", "b", "b", "a"]));
    k.insert_n(0, 3, "v".to_string()).unwrap();
    assert_eq!(k.capacity(), 10);
    assert_eq!(concat(&k), "vvvabba");
}

#[test]
fn growable_insert_single() {
    let mut k = GrowableBuffer::from(strings(&["a", "b", "b", "a"]));
    let index = (k.begin() + 2).index();
    k.insert(index, "vv".to_string()).unwrap();
    assert_eq!(k.capacity(), 10);
    assert_eq!(concat(&k), "abvvba");
}

#[test]
fn growable_insert_own_range() {
    let mut k: GrowableBuffer<String> = GrowableBuffer::with_capacity(3);
    k.push_back("a".to_string());
    k.push_back("b".to_string());
    k.push_back("b".to_string());
    k.push_back("a".to_string());
    k.insert_range(0, 0..2).unwrap();
    assert_eq!(k.capacity(), 8);
    assert_eq!(concat(&k), "ababba");
}

#[test]
fn erase_through_cursor() {
    let mut a = CircularBuffer::from(["Yes", "I'm", "DELETED", "man", "of", "devotion", "end..."]);
    let index = (a.begin() + 2).index();
    assert_eq!(a.cursor_mut(index).remove(), Ok("DELETED"));
    assert_eq!(a, ["Yes", "I'm", "man", "of", "devotion", "end..."]);
}

#[test]
fn assign_from_buffer() {
    let mut a = CircularBuffer::from([
        "I", "Walk", "this", "empty", "street", "on", "the Boulevard of Broken dreams",
    ]);
    a.assign(&CircularBuffer::from(["1", "2", "3", "4"]));
    assert_eq!(a, ["1", "2", "3", "4", "street", "on", "the Boulevard of Broken dreams"]);
}

#[test]
fn assign_fill_value() {
    let mut a = CircularBuffer::from([
        "I", "Walk", "this", "empty", "street", "on", "the Boulevard of Broken dreams",
    ]);
    a.assign_n(4, "1");
    assert_eq!(a, ["1", "1", "1", "1", "street", "on", "the Boulevard of Broken dreams"]);

    let mut g: GrowableBuffer<_> = GrowableBuffer::from(["I", "Walk"]);
    g.assign_n(4, "1").unwrap();
    assert_eq!(g, ["1"; 4]);
}

#[test]
fn out_of_range_is_distinguished() {
    let mut fixed: CircularBuffer<u8> = CircularBuffer::with_capacity(2);
    let mut growable: GrowableBuffer<u8> = GrowableBuffer::with_capacity(2);
    for err in [
        fixed.pop_front().unwrap_err(),
        growable.pop_back().unwrap_err(),
        fixed.at(0).unwrap_err(),
        growable.remove(0).unwrap_err(),
        fixed.insert(1, 0).unwrap_err(),
        growable.insert(1, 0).unwrap_err(),
    ] {
        assert!(err.is_out_of_range(), "{}", err);
    }
    assert_eq!(fixed.insert(1, 0), Err(Error::OutOfRange { index: 1, len: 0 }));
}

#[test]
fn generic_code_sees_both_policies() {
    fn push_all<R: RingBuffer<Item = u8>>(ring: &mut R, n: u8) -> usize {
        (0..n).filter_map(|i| ring.push_back(i).unwrap()).count()
    }
    let mut fixed: CircularBuffer<u8> = CircularBuffer::with_capacity(4);
    let mut growable: GrowableBuffer<u8> = GrowableBuffer::with_capacity(4);
    assert_eq!(push_all(&mut fixed, 10), 6);
    assert_eq!(push_all(&mut growable, 10), 0);
    assert_eq!(fixed.len(), 4);
    assert_eq!(growable.len(), 10);
    assert_eq!(growable.capacity(), 10);
}
