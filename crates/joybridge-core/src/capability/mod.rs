//! Capability tables: index → Linux input event code.
//!
//! A capability is an event family plus an event code that the virtual device
//! was declared to support when it was created.  Inbound messages do not
//! carry event codes directly; they carry a small index (`number`) that is
//! resolved through one of two tables:
//!
//! - the **button** table, for discrete pressed/released controls (`EV_KEY`);
//! - the **axis** table, for continuous controls such as sticks and triggers
//!   (`EV_ABS`).
//!
//! The virtual device is registered from exactly these tables (see
//! [`Capabilities::declared_codes`]), which is what keeps the device's
//! declared input surface and the translation tables identical.  Adding a
//! control means adding one table entry; the declaration follows from it.

pub mod xbox;

use thiserror::Error;

use crate::protocol::messages::EventFamily;

/// Raw `type` discriminator for button events (`JS_EVENT_BUTTON` in
/// `linux/joystick.h`).
pub const JS_EVENT_BUTTON: i32 = 0x01;

/// Raw `type` discriminator for axis events (`JS_EVENT_AXIS` in
/// `linux/joystick.h`).
pub const JS_EVENT_AXIS: i32 = 0x02;

/// The two recognised event kinds of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Discrete two-state control.
    Button,
    /// Continuous-valued control.
    Axis,
}

impl EventKind {
    /// Resolves the raw `type` field of a message.
    ///
    /// Returns `None` for anything other than [`JS_EVENT_BUTTON`] and
    /// [`JS_EVENT_AXIS`].
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            JS_EVENT_BUTTON => Some(Self::Button),
            JS_EVENT_AXIS => Some(Self::Axis),
            _ => None,
        }
    }

    /// Returns the raw `type` discriminator for this kind.
    pub fn raw(self) -> i32 {
        match self {
            Self::Button => JS_EVENT_BUTTON,
            Self::Axis => JS_EVENT_AXIS,
        }
    }

    /// Returns the device event family written for this kind.
    pub fn family(self) -> EventFamily {
        match self {
            Self::Button => EventFamily::Key,
            Self::Axis => EventFamily::Absolute,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Button => f.write_str("button"),
            Self::Axis => f.write_str("axis"),
        }
    }
}

/// Returned by a table lookup when the index is outside `0..bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} is outside 0..{bound}")]
pub struct InvalidIndex {
    /// The index that was asked for.
    pub index: i32,
    /// The table length (first invalid index).
    pub bound: usize,
}

/// One entry of a capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityEntry {
    /// Linux input event code (`BTN_*` or `ABS_*`).
    pub code: u16,
    /// Symbolic name from `input-event-codes.h`; logged when the device is
    /// declared.
    pub name: &'static str,
}

/// An ordered, immutable index → event code table.
///
/// Indices are contiguous from 0.  Tables are built as `static` data and
/// never change for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTable {
    family: EventFamily,
    entries: &'static [CapabilityEntry],
}

impl CapabilityTable {
    /// Builds a table over a static entry slice.
    pub const fn new(family: EventFamily, entries: &'static [CapabilityEntry]) -> Self {
        Self { family, entries }
    }

    /// The event family every code in this table belongs to.
    pub fn family(&self) -> EventFamily {
        self.family
    }

    /// Number of entries; valid indices are `0..len()`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndex`] if `index` is negative or `>= len()`.
    pub fn entry(&self, index: i32) -> Result<&CapabilityEntry, InvalidIndex> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get(i))
            .ok_or(InvalidIndex {
                index,
                bound: self.entries.len(),
            })
    }

    /// Returns the event code at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndex`] if `index` is negative or `>= len()`.
    pub fn code(&self, index: i32) -> Result<u16, InvalidIndex> {
        self.entry(index).map(|e| e.code)
    }

    /// Iterates over the event codes in index order.
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().map(|e| e.code)
    }

    /// Iterates over the entries in index order.
    pub fn entries(&self) -> impl Iterator<Item = &CapabilityEntry> + '_ {
        self.entries.iter()
    }
}

/// The pair of tables describing a virtual device's whole input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Button table (`EV_KEY` codes).
    pub buttons: CapabilityTable,
    /// Axis table (`EV_ABS` codes).
    pub axes: CapabilityTable,
}

impl Capabilities {
    /// XBOX-style controller layout: 11 buttons and 8 axes.
    pub const XBOX: Self = Self {
        buttons: xbox::BUTTONS,
        axes: xbox::AXES,
    };

    /// Returns the table selected by `kind`.
    pub fn table(&self, kind: EventKind) -> &CapabilityTable {
        match kind {
            EventKind::Button => &self.buttons,
            EventKind::Axis => &self.axes,
        }
    }

    /// Resolves `index` in the table selected by `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndex`] carrying `index` and the table length when
    /// `index` is out of bounds.
    pub fn lookup(&self, kind: EventKind, index: i32) -> Result<u16, InvalidIndex> {
        self.table(kind).code(index)
    }

    /// Every `(family, code)` pair the device must be created with, buttons
    /// first, each table in index order.
    pub fn declared_codes(&self) -> impl Iterator<Item = (EventFamily, u16)> + '_ {
        let buttons = self.buttons.codes().map(|c| (self.buttons.family(), c));
        let axes = self.axes.codes().map(|c| (self.axes.family(), c));
        buttons.chain(axes)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::XBOX
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
