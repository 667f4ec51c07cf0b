use std::borrow::Borrow;
use std::fmt;

/// Boolean test pushed onto a [`FilterStack`].
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Ordered stack of predicates projected over a backing collection.
///
/// The visible sequence is the backing collection filtered by the AND of every
/// pushed predicate. Pushing never replaces an earlier predicate, so a keyword
/// search and a status narrowing issued by different commands compose. The
/// stack holds no copy of the data: [`FilterStack::view`] walks whatever the
/// backing collection holds at the time of the call.
///
/// One extra slot, the scope, holds a predicate owned by a coordinator. It is
/// ANDed with the stack but replaced rather than appended, so re-scoping never
/// disturbs the pushed predicates.
pub struct FilterStack<T> {
    predicates: Vec<Predicate<T>>,
    scope: Option<Predicate<T>>,
}

impl<T> FilterStack<T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            scope: None,
        }
    }

    pub fn push<P>(&mut self, predicate: P)
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
    }

    /// Installs `predicate` as the scope, dropping any previous scope.
    pub fn set_scope<P>(&mut self, predicate: P)
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.scope = Some(Box::new(predicate));
    }

    pub fn clear_scope(&mut self) {
        self.scope = None;
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }

    /// Empties the stack and the scope.
    pub fn clear(&mut self) {
        self.predicates.clear();
        self.scope = None;
    }

    /// Number of active predicates, the scope included.
    pub fn depth(&self) -> usize {
        self.predicates.len() + usize::from(self.scope.is_some())
    }

    pub fn is_filtered(&self) -> bool {
        self.depth() > 0
    }

    pub fn matches(&self, item: &T) -> bool {
        self.scope.as_ref().is_none_or(|scope| scope(item))
            && self.predicates.iter().all(|predicate| predicate(item))
    }

    /// Lazily filters `backing`, keeping its order.
    pub fn view<'a, B>(&'a self, backing: &'a [B]) -> impl Iterator<Item = &'a B> + 'a
    where
        B: Borrow<T>,
        T: 'a,
    {
        backing
            .iter()
            .filter(move |item| self.matches(Borrow::<T>::borrow(*item)))
    }
}

impl<T> Default for FilterStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FilterStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStack")
            .field("depth", &self.predicates.len())
            .field("scoped", &self.scope.is_some())
            .finish()
    }
}
