//! Form component API keys.
//!
//! A key is both the component's identity inside the schema and the name its
//! value is submitted under, so keys are compared constantly: on every
//! lookup, rename check, and builder sync. They are interned once and passed
//! around as 4-byte handles. Fresh keys for dropped components come from
//! `KeyGenerator` (`{type}{millis}`); `submit` is reserved for the trailing
//! submit button.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide key table shared by every schema.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Key of the trailing submit button every schema carries.
pub const SUBMIT_KEY: &str = "submit";

/// The API key identifying a component within a form schema.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKey(Spur);

impl ComponentKey {
    /// Intern a string as a key, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ComponentKey(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// The reserved key of the submit button.
    pub fn submit() -> Self {
        Self::intern(SUBMIT_KEY)
    }

    pub fn is_submit(&self) -> bool {
        *self == Self::submit()
    }

    /// True for a key the form renderer could not submit a value under.
    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{:?}", self.as_str())
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ComponentKey::intern(&s))
    }
}

// ─── Key generation ──────────────────────────────────────────────────────

/// Millisecond wall clock used to stamp generated keys.
pub type Clock = fn() -> u64;

/// Milliseconds since the Unix epoch from the host clock.
///
/// Not usable on `wasm32-unknown-unknown`; the bridge supplies `Date.now()`.
pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Issues `{type}{timestamp}` keys. Stamps are strictly increasing within a
/// session, so two insertions in the same millisecond still differ.
#[derive(Debug, Clone, Copy)]
pub struct KeyGenerator {
    clock: Clock,
    last_stamp: u64,
}

impl KeyGenerator {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            last_stamp: 0,
        }
    }

    /// Produce the next key with the given prefix.
    pub fn next_key(&mut self, prefix: &str) -> ComponentKey {
        let now = (self.clock)();
        let stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + 1
        };
        self.last_stamp = stamp;
        ComponentKey::intern(&format!("{prefix}{stamp}"))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(system_clock)
    }
}
