//! Runtime values for the interpreter

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Runtime value: a scalar integer or a shared sequence reference
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// Reference to a shared, growable sequence of integers
    Seq(Seq),
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Seq(_) => "sequence",
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as sequence
    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Seq(s) => write!(f, "{:?}", s),
        }
    }
}

impl PartialEq for Value {
    /// Equality between an int and a sequence is always false, never an error
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            _ => false,
        }
    }
}

/// A shared handle to a heap-resident growable sequence of integers.
///
/// Cloning a handle acquires a reference; dropping one releases it. Storage
/// is freed exactly when the last handle goes away, so the manual
/// acquire/release discipline of a refcounted sequence cannot be violated.
/// Multiple variables holding the same handle truly alias one sequence:
/// mutation through one is visible through all.
#[derive(Clone)]
pub struct Seq(Rc<RefCell<Vec<i64>>>);

impl Seq {
    /// Create a new, empty sequence
    pub fn new() -> Self {
        Seq(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create a sequence holding the given elements
    pub fn from_vec(data: Vec<i64>) -> Self {
        Seq(Rc::new(RefCell::new(data)))
    }

    /// Current element count
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Read the element at `idx`, or `None` if out of range
    pub fn get(&self, idx: usize) -> Option<i64> {
        self.0.borrow().get(idx).copied()
    }

    /// Overwrite the element at `idx` in place.
    ///
    /// No range diagnostic: an out-of-range write aborts via the underlying
    /// bounds panic, like a refcount underflow would.
    pub fn set(&self, idx: usize, value: i64) {
        self.0.borrow_mut()[idx] = value;
    }

    /// Append an element; amortized O(1) via doubling growth
    pub fn push(&self, value: i64) {
        self.0.borrow_mut().push(value);
    }

    /// Number of live handles to this sequence, observable for tests
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Snapshot of the current contents
    pub fn to_vec(&self) -> Vec<i64> {
        self.0.borrow().clone()
    }

    /// Strict lexicographic less-than: the first differing pair decides;
    /// with no differing pair, the shorter sequence is less.
    pub fn lex_lt(&self, other: &Seq) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return false;
        }
        let a = self.0.borrow();
        let b = other.0.borrow();
        for (x, y) in a.iter().zip(b.iter()) {
            if x != y {
                return x < y;
            }
        }
        a.len() < b.len()
    }
}

impl Default for Seq {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Seq {
    /// Deep equality: equal length and pairwise-equal elements
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_acquires_drop_releases() {
        let seq = Seq::new();
        assert_eq!(seq.ref_count(), 1);
        let alias = seq.clone();
        assert_eq!(seq.ref_count(), 2);
        drop(alias);
        assert_eq!(seq.ref_count(), 1);
    }

    #[test]
    fn test_aliases_share_storage() {
        let seq = Seq::from_vec(vec![1, 2, 3]);
        let alias = seq.clone();
        alias.push(4);
        assert_eq!(seq.len(), 4);
        seq.set(0, 9);
        assert_eq!(alias.get(0), Some(9));
    }

    #[test]
    fn test_lex_lt_first_difference_decides() {
        let a = Seq::from_vec(vec![1, 2, 3]);
        let b = Seq::from_vec(vec![1, 3, 0]);
        assert!(a.lex_lt(&b));
        assert!(!b.lex_lt(&a));
    }

    #[test]
    fn test_lex_lt_prefix_is_less() {
        let a = Seq::from_vec(vec![1, 2]);
        let b = Seq::from_vec(vec![1, 2, 0]);
        assert!(a.lex_lt(&b));
        assert!(!b.lex_lt(&a));
    }

    #[test]
    fn test_lex_lt_equal_contents_false_both_ways() {
        let a = Seq::from_vec(vec![5, 5]);
        let b = Seq::from_vec(vec![5, 5]);
        assert!(!a.lex_lt(&b));
        assert!(!b.lex_lt(&a));
        assert!(!a.lex_lt(&a));
    }

    #[test]
    fn test_deep_equality() {
        let a = Seq::from_vec(vec![1, 2]);
        let b = Seq::from_vec(vec![1, 2]);
        let c = Seq::from_vec(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_mixed_equality_is_false() {
        let seq = Value::Seq(Seq::from_vec(vec![1]));
        assert_ne!(seq, Value::Int(1));
        assert_ne!(Value::Int(1), seq);
    }
}
