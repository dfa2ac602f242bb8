//! Strongly typed action identifiers.
//!
//! Actions the steering code requests itself get their own variants; every
//! other clip name (`"roar"`, `"hitLeft"`, ...) is lower-cased and interned
//! into a [`Symbol`] so comparisons and hashing stay O(1).

use std::fmt;
use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

/// Global interner for custom action names.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Compact identifier for an interned action name.
pub type Symbol = Spur;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Idle,
    Walk,
    Run,
    Die,
    Named(Symbol),
}

impl ActionId {
    /// Case-insensitive lookup: `"Walk"`, `"WALK"` and `"walk"` are the same action.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize(name);
        match normalized.as_str() {
            "idle" => ActionId::Idle,
            "walk" => ActionId::Walk,
            "run" => ActionId::Run,
            "die" => ActionId::Die,
            other => ActionId::Named(INTERNER.get_or_intern(other)),
        }
    }

    /// The normalized (lower-case) name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Idle => "idle",
            ActionId::Walk => "walk",
            ActionId::Run => "run",
            ActionId::Die => "die",
            ActionId::Named(sym) => INTERNER.resolve(sym),
        }
    }
}

impl From<&str> for ActionId {
    fn from(name: &str) -> Self {
        ActionId::from_name(name)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn normalize(name: &str) -> String {
    name.to_lowercase()
}
