//! Open enumerations for iCalendar property and parameter values.
//!
//! RFC 5545 lets producers send values outside the registered set
//! (`X-NAME` and IANA tokens), so each type here keeps a small set of
//! well-known values and interns anything else it sees on first use.
//! Values are canonicalised to ASCII uppercase; equality is by that string.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-wide interning table for one value type.
#[derive(Debug)]
pub(crate) struct Registry {
    kind: &'static str,
    values: RwLock<HashMap<String, Arc<str>>>,
}

impl Registry {
    pub(crate) fn with_known(kind: &'static str, known: &[&str]) -> Self {
        let values = known
            .iter()
            .map(|value| ((*value).to_string(), Arc::from(*value)))
            .collect();
        Self {
            kind,
            values: RwLock::new(values),
        }
    }

    /// Returns the shared instance for `value`, registering it if unseen.
    pub(crate) fn intern(&self, value: &str) -> Arc<str> {
        let key = value.trim().to_ascii_uppercase();

        if let Some(found) = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(found);
        }

        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let interned = values.entry(key).or_insert_with_key(|key| {
            tracing::trace!(kind = self.kind, value = %key, "Registered value");
            Arc::from(key.as_str())
        });
        Arc::clone(interned)
    }
}

/// Declares an interned open-enumeration type.
///
/// Each `fn name => "VALUE"` line becomes a constructor for a well-known
/// value; `parse` accepts anything else.
macro_rules! open_enumeration {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$item_meta:meta])* fn $ctor:ident => $text:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(std::sync::Arc<str>);

        impl $name {
            const WELL_KNOWN: &'static [&'static str] = &[$($text),+];

            fn registry() -> &'static $crate::model::registry::Registry {
                static REGISTRY: std::sync::LazyLock<$crate::model::registry::Registry> =
                    std::sync::LazyLock::new(|| {
                        $crate::model::registry::Registry::with_known(stringify!($name), $name::WELL_KNOWN)
                    });
                &REGISTRY
            }

            $(
                $(#[$item_meta])*
                #[must_use]
                pub fn $ctor() -> Self {
                    Self::parse($text)
                }
            )+

            /// Looks up or registers `value` (case-insensitive).
            #[must_use]
            pub fn parse(value: &str) -> Self {
                Self(Self::registry().intern(value))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this is one of the registered values rather than one
            /// learned from input.
            #[must_use]
            pub fn is_well_known(&self) -> bool {
                Self::WELL_KNOWN.contains(&self.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::parse(value)
            }
        }
    };
}

pub(crate) use open_enumeration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_case_insensitive() {
        let registry = Registry::with_known("Test", &["ALPHA"]);
        let lower = registry.intern("alpha");
        let upper = registry.intern("ALPHA");
        assert!(Arc::ptr_eq(&lower, &upper));
        assert_eq!(registry.values.read().unwrap().len(), 1);
    }

    #[test]
    fn unknown_values_are_registered_once() {
        let registry = Registry::with_known("Test", &[]);
        let first = registry.intern("x-custom");
        let second = registry.intern(" X-Custom ");
        assert_eq!(&*first, "X-CUSTOM");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.values.read().unwrap().len(), 1);
    }
}
