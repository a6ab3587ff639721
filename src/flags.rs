//! Patch flags: the bitmask a virtual node carries so the runtime can skip
//! diff work for the parts of the node that cannot change.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use indexmap::IndexSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PatchFlags(i32);

impl PatchFlags {
    pub const NONE: Self = Self(0);
    /// Dynamic text content.
    pub const TEXT: Self = Self(1);
    /// Dynamic `class` binding.
    pub const CLASS: Self = Self(1 << 1);
    /// Dynamic `style` binding.
    pub const STYLE: Self = Self(1 << 2);
    /// Dynamic non-class/style props, listed in the dynamic prop names.
    pub const PROPS: Self = Self(1 << 3);
    /// Props with dynamic keys; requires a full props diff.
    pub const FULL_PROPS: Self = Self(1 << 4);
    /// Event listeners that must be attached during hydration.
    pub const HYDRATE_EVENTS: Self = Self(1 << 5);
    /// Fragment whose children never change order.
    pub const STABLE_FRAGMENT: Self = Self(1 << 6);
    pub const KEYED_FRAGMENT: Self = Self(1 << 7);
    pub const UNKEYED_FRAGMENT: Self = Self(1 << 8);
    /// Node needs patching for refs or directive hooks only.
    pub const NEED_PATCH: Self = Self(1 << 9);
    pub const DYNAMIC_SLOTS: Self = Self(1 << 10);
    /// Static node, never diffed.
    pub const HOISTED: Self = Self(-1);
    /// Leave optimized mode and diff fully.
    pub const BAIL: Self = Self(-2);

    const NAMED_BITS: [(Self, &'static str); 11] = [
        (Self::TEXT, "TEXT"),
        (Self::CLASS, "CLASS"),
        (Self::STYLE, "STYLE"),
        (Self::PROPS, "PROPS"),
        (Self::FULL_PROPS, "FULL_PROPS"),
        (Self::HYDRATE_EVENTS, "HYDRATE_EVENTS"),
        (Self::STABLE_FRAGMENT, "STABLE_FRAGMENT"),
        (Self::KEYED_FRAGMENT, "KEYED_FRAGMENT"),
        (Self::UNKEYED_FRAGMENT, "UNKEYED_FRAGMENT"),
        (Self::NEED_PATCH, "NEED_PATCH"),
        (Self::DYNAMIC_SLOTS, "DYNAMIC_SLOTS"),
    ];

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set. Sentinels only contain themselves.
    pub fn contains(self, other: Self) -> bool {
        if self.0 < 0 || other.0 < 0 {
            return self == other;
        }
        self.0 & other.0 == other.0
    }

    /// Names of the set bits, in declaration order.
    pub fn names(self) -> Vec<&'static str> {
        match self {
            Self::HOISTED => vec!["HOISTED"],
            Self::BAIL => vec!["BAIL"],
            _ => Self::NAMED_BITS
                .iter()
                .filter(|(flag, _)| self.contains(*flag))
                .map(|(_, name)| *name)
                .collect(),
        }
    }
}

impl BitOr for PatchFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PatchFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PatchFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for PatchFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

/// What the attribute classifier learned about one element.
#[derive(Debug, Default, Clone)]
pub struct PropsAnalysis {
    pub has_ref: bool,
    pub has_class_binding: bool,
    pub has_style_binding: bool,
    pub has_hydration_event_binding: bool,
    pub has_dynamic_keys: bool,
    pub dynamic_prop_names: IndexSet<String>,
}

impl PropsAnalysis {
    pub fn patch_flag(&self, directive_count: usize) -> PatchFlags {
        let mut flag = PatchFlags::NONE;

        if self.has_dynamic_keys {
            flag |= PatchFlags::FULL_PROPS;
        } else {
            if self.has_class_binding {
                flag |= PatchFlags::CLASS;
            }
            if self.has_style_binding {
                flag |= PatchFlags::STYLE;
            }
            if !self.dynamic_prop_names.is_empty() {
                flag |= PatchFlags::PROPS;
            }
            if self.has_hydration_event_binding {
                flag |= PatchFlags::HYDRATE_EVENTS;
            }
        }

        if (flag.is_empty() || flag == PatchFlags::HYDRATE_EVENTS)
            && (self.has_ref || directive_count > 0)
        {
            flag |= PatchFlags::NEED_PATCH;
        }

        flag
    }

    /// Dynamic prop names worth emitting: only when PROPS survives FULL_PROPS.
    pub fn emitted_prop_names(&self, flag: PatchFlags) -> Option<&IndexSet<String>> {
        if flag.contains(PatchFlags::PROPS)
            && !flag.contains(PatchFlags::FULL_PROPS)
            && !self.dynamic_prop_names.is_empty()
        {
            Some(&self.dynamic_prop_names)
        } else {
            None
        }
    }
}

/// Flag for a fragment's own child list.
pub fn fragment_patch_flag(child_count: usize, has_unanalyzable_child: bool) -> PatchFlags {
    if has_unanalyzable_child {
        PatchFlags::BAIL
    } else if child_count > 1 {
        PatchFlags::STABLE_FRAGMENT
    } else {
        PatchFlags::NONE
    }
}
