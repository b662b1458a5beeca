//! Arena identities for HIR nodes.
//!
//! Every node lives in one [`IndexVec`] owned by [`Hir`](super::Hir) and is
//! named by its [`NodeId`]. Child references use [`Id<H>`], a `NodeId`
//! tagged with the kind of node the parent expects there (any expression,
//! any statement, exactly an identifier, ...). Typed ids are only handed
//! out by the arena, so a well-formed `Id<Expr>` always names an expression.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer};

use super::{ElementType, SetIndexSet, StmtBlock};

/// Untyped identity of a node within its arena
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A type that can be used to index an [`IndexVec`]
pub trait Idx: Copy + Eq {
    fn new(raw: u32) -> Self;
    fn index(self) -> usize;
}

impl Idx for NodeId {
    fn new(raw: u32) -> Self {
        Self(raw)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A Vec indexed by a newtype index
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct IndexVec<I: Idx, T> {
    raw: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<fn(I) -> I>,
}

impl<I: Idx, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T> IndexVec<I, T> {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Push a value and return its index
    #[allow(clippy::cast_possible_truncation)]
    pub fn push(&mut self, value: T) -> I {
        let idx = I::new(self.raw.len() as u32);
        self.raw.push(value);
        idx
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn get(&self, idx: I) -> Option<&T> {
        self.raw.get(idx.index())
    }

    pub fn get_mut(&mut self, idx: I) -> Option<&mut T> {
        self.raw.get_mut(idx.index())
    }

    pub fn contains(&self, idx: I) -> bool {
        idx.index() < self.raw.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw
            .iter()
            .enumerate()
            .map(|(i, v)| (I::new(i as u32), v))
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    fn index(&self, idx: I) -> &T {
        &self.raw[idx.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    fn index_mut(&mut self, idx: I) -> &mut T {
        &mut self.raw[idx.index()]
    }
}

/// A kind of node a typed [`Id`] may refer to
pub trait Handle: 'static {
    /// Human-readable name used in diagnostics
    const NAME: &'static str;
}

/// A [`NodeId`] known to name a node of kind `H`
pub struct Id<H> {
    raw: NodeId,
    _kind: PhantomData<fn() -> H>,
}

impl<H> Id<H> {
    pub(crate) fn from_raw(raw: NodeId) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// The untyped identity
    pub fn node(self) -> NodeId {
        self.raw
    }
}

impl<H> Clone for Id<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Id<H> {}

impl<H> PartialEq for Id<H> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<H> Eq for Id<H> {}

impl<H> Hash for Id<H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.raw.hash(state);
    }
}

impl<H: Handle> fmt::Debug for Id<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", H::NAME, self.raw.0)
    }
}

impl<H> fmt::Display for Id<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

impl<H> Serialize for Id<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<H> From<Id<H>> for NodeId {
    fn from(id: Id<H>) -> Self {
        id.raw
    }
}

// Handles for the open families. These are type-level tags only.

/// Any expression
#[derive(Debug)]
pub enum Expr {}
/// Any statement
#[derive(Debug)]
pub enum Stmt {}
/// Any type
#[derive(Debug)]
pub enum Type {}
/// Any tensor dimension descriptor
#[derive(Debug)]
pub enum IndexSet {}
/// A `for` loop domain
#[derive(Debug)]
pub enum ForDomain {}
/// One position of a tensor read
#[derive(Debug)]
pub enum ReadParam {}
/// One level of a dense tensor literal
#[derive(Debug)]
pub enum DenseTensor {}

pub type ExprId = Id<Expr>;
pub type StmtId = Id<Stmt>;
pub type TypeId = Id<Type>;
pub type IndexSetId = Id<IndexSet>;
pub type ForDomainId = Id<ForDomain>;
pub type ReadParamId = Id<ReadParam>;
pub type DenseTensorId = Id<DenseTensor>;

macro_rules! impl_handle {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl Handle for $ty {
            const NAME: &'static str = $name;
        })*
    };
}

impl_handle! {
    Expr => "expr",
    Stmt => "stmt",
    Type => "type",
    IndexSet => "index_set",
    ForDomain => "domain",
    ReadParam => "read_param",
    DenseTensor => "dense",
}

// Narrow handles widen to their family.

impl From<Id<StmtBlock>> for StmtId {
    fn from(id: Id<StmtBlock>) -> Self {
        Id::from_raw(id.raw)
    }
}

impl From<Id<SetIndexSet>> for IndexSetId {
    fn from(id: Id<SetIndexSet>) -> Self {
        Id::from_raw(id.raw)
    }
}

impl From<Id<ElementType>> for TypeId {
    fn from(id: Id<ElementType>) -> Self {
        Id::from_raw(id.raw)
    }
}
