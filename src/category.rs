// Number categories drawn on by the phrase generator.
// The table is fixed at compile time and not extensible at runtime.
use crate::numerals::NumberFormat;

/// Category descriptor (immutable). Ranges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberCategory {
    pub name: &'static str,
    pub suffix: &'static str, // unit appended to both display and speech text
    pub min: i64,
    pub max: i64,
    pub format: NumberFormat,
}

impl NumberCategory {
    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Number as printed on the feedback screen. Ticket numbers keep four
    /// digits (0042号); everything else prints plainly.
    pub fn display_number(&self, n: i64) -> String {
        match (self.format, self.name) {
            (NumberFormat::DigitByDigit, "ticket") => format!("{n:04}"),
            _ => n.to_string(),
        }
    }
}

// Phone numbers (11 digits, read digit by digit) are left out until the drill
// grows difficulty levels.
pub static NUMBER_CATEGORIES: [NumberCategory; 7] = [
    NumberCategory {
        name: "year",
        suffix: "年",
        min: 1900,
        max: 2026,
        format: NumberFormat::Year,
    },
    NumberCategory {
        name: "age",
        suffix: "岁",
        min: 1,
        max: 120,
        format: NumberFormat::Regular,
    },
    NumberCategory {
        name: "ticket",
        suffix: "号",
        min: 0,
        max: 9999,
        format: NumberFormat::DigitByDigit,
    },
    NumberCategory {
        name: "price",
        suffix: "元",
        min: 1,
        max: 9999,
        format: NumberFormat::Regular,
    },
    NumberCategory {
        name: "room",
        suffix: "号",
        min: 101,
        max: 9999,
        format: NumberFormat::DigitByDigit,
    },
    NumberCategory {
        name: "floor",
        suffix: "层",
        min: 1,
        max: 100,
        format: NumberFormat::Regular,
    },
    NumberCategory {
        name: "bus",
        suffix: "路",
        min: 1,
        max: 999,
        format: NumberFormat::Regular,
    },
];

pub fn category_by_name(name: &str) -> Option<&'static NumberCategory> {
    NUMBER_CATEGORIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let bus = category_by_name("bus").unwrap();
        assert_eq!(bus.suffix, "路");
        assert!(category_by_name("phone").is_none());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let age = category_by_name("age").unwrap();
        assert!(age.contains(1));
        assert!(age.contains(120));
        assert!(!age.contains(0));
        assert!(!age.contains(121));
    }

    #[test]
    fn test_display_padding() {
        let ticket = category_by_name("ticket").unwrap();
        assert_eq!(ticket.display_number(42), "0042");
        assert_eq!(ticket.display_number(0), "0000");
        assert_eq!(ticket.display_number(1234), "1234");
        let room = category_by_name("room").unwrap();
        assert_eq!(room.display_number(305), "305");
        let price = category_by_name("price").unwrap();
        assert_eq!(price.display_number(7), "7");
    }
}
