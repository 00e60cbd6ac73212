//! XBOX controller layout for the virtual joystick.
//!
//! Event codes are defined in `linux/input-event-codes.h`.
//! Reference: https://github.com/torvalds/linux/blob/master/include/uapi/linux/input-event-codes.h
//!
//! # Index order
//!
//! The index of each entry is the `number` field of an inbound message.  The
//! order follows the button/axis numbering the Linux joystick API (`js`)
//! reports for an XBOX pad, so a publisher reading `/dev/input/js0` on one
//! machine can forward its events verbatim to this bridge on another.

use super::{CapabilityEntry, CapabilityTable};
use crate::protocol::messages::EventFamily;

/// Number of buttons on the virtual device.
pub const BUTTON_COUNT: usize = 11;

/// Number of axes on the virtual device.
pub const AXIS_COUNT: usize = 8;

const BUTTON_ENTRIES: [CapabilityEntry; BUTTON_COUNT] = [
    CapabilityEntry { code: 0x130, name: "BTN_A" },
    CapabilityEntry { code: 0x131, name: "BTN_B" },
    CapabilityEntry { code: 0x133, name: "BTN_X" },
    CapabilityEntry { code: 0x134, name: "BTN_Y" },
    CapabilityEntry { code: 0x136, name: "BTN_TL" },
    CapabilityEntry { code: 0x137, name: "BTN_TR" },
    CapabilityEntry { code: 0x13A, name: "BTN_SELECT" },
    CapabilityEntry { code: 0x13B, name: "BTN_START" },
    // Guide button.
    CapabilityEntry { code: 0x117, name: "BTN_TASK" },
    CapabilityEntry { code: 0x13D, name: "BTN_THUMBL" },
    CapabilityEntry { code: 0x13E, name: "BTN_THUMBR" },
];

const AXIS_ENTRIES: [CapabilityEntry; AXIS_COUNT] = [
    CapabilityEntry { code: 0x10, name: "ABS_HAT0X" },
    CapabilityEntry { code: 0x11, name: "ABS_HAT0Y" },
    // Left trigger.
    CapabilityEntry { code: 0x0A, name: "ABS_BRAKE" },
    CapabilityEntry { code: 0x12, name: "ABS_HAT1X" },
    CapabilityEntry { code: 0x13, name: "ABS_HAT1Y" },
    // Right trigger.
    CapabilityEntry { code: 0x09, name: "ABS_GAS" },
    CapabilityEntry { code: 0x14, name: "ABS_HAT2X" },
    CapabilityEntry { code: 0x15, name: "ABS_HAT2Y" },
];

/// Button table (`EV_KEY`).
pub const BUTTONS: CapabilityTable = CapabilityTable::new(EventFamily::Key, &BUTTON_ENTRIES);

/// Axis table (`EV_ABS`).
pub const AXES: CapabilityTable = CapabilityTable::new(EventFamily::Absolute, &AXIS_ENTRIES);

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_lengths() {
        assert_eq!(BUTTONS.len(), BUTTON_COUNT);
        assert_eq!(AXES.len(), AXIS_COUNT);
    }

    #[test]
    fn test_button_codes_are_unique() {
        let codes: HashSet<u16> = BUTTONS.codes().collect();
        assert_eq!(codes.len(), BUTTONS.len());
    }

    #[test]
    fn test_axis_codes_are_unique() {
        let codes: HashSet<u16> = AXES.codes().collect();
        assert_eq!(codes.len(), AXES.len());
    }

    #[test]
    fn test_button_codes_are_in_the_btn_range() {
        // BTN_MISC (0x100) .. KEY_OK (0x160) holds every gamepad/misc button.
        for entry in BUTTONS.entries() {
            assert!(
                (0x100..0x160).contains(&entry.code),
                "{} (0x{:03X}) must be a BTN_* code",
                entry.name,
                entry.code
            );
        }
    }

    #[test]
    fn test_axis_codes_are_below_abs_max() {
        // ABS_MAX is 0x3F.
        for entry in AXES.entries() {
            assert!(entry.code <= 0x3F, "{} must be a valid ABS_* code", entry.name);
        }
    }

    #[test]
    fn test_entry_names_match_their_family() {
        for entry in BUTTONS.entries() {
            assert!(entry.name.starts_with("BTN_"), "button 0x{:03X} is named {}", entry.code, entry.name);
        }
        for entry in AXES.entries() {
            assert!(entry.name.starts_with("ABS_"), "axis 0x{:02X} is named {}", entry.code, entry.name);
        }
    }

    #[test]
    fn test_triggers_map_to_brake_and_gas() {
        assert_eq!(AXES.entry(2).map(|e| e.name), Ok("ABS_BRAKE"));
        assert_eq!(AXES.entry(5).map(|e| e.name), Ok("ABS_GAS"));
    }

    #[test]
    fn test_face_buttons_come_first() {
        let names: Vec<&str> = BUTTONS.entries().take(4).map(|e| e.name).collect();
        assert_eq!(names, ["BTN_A", "BTN_B", "BTN_X", "BTN_Y"]);
    }
}
