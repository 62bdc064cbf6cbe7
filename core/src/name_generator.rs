//! Deterministic customer and product name generation.
//!
//! Customers in the retail dataset are companies; products carry a single
//! capitalized word. All generation is deterministic (same RNG seed = same names).

use crate::rng::TableRng;

/// Deterministic name generator using curated word lists
pub struct NameGenerator;

impl NameGenerator {
    /// Generate a company name in one of three shapes:
    /// "Walker Holdings", "Walker-Reyes", "Walker, Reyes and Shaw".
    pub fn generate_company_name(rng: &mut TableRng) -> String {
        let first = Self::surname(rng);
        match rng.next_u64_below(3) {
            0 => format!("{} {}", first, rng.pick(Self::company_suffixes())),
            1 => format!("{}-{}", first, Self::surname(rng)),
            _ => format!(
                "{}, {} and {}",
                first,
                Self::surname(rng),
                Self::surname(rng)
            ),
        }
    }

    /// Generate a product name: one capitalized catalogue word,
    /// occasionally prefixed by a line name ("Pro Lantern").
    pub fn generate_product_name(rng: &mut TableRng) -> String {
        let word = *rng.pick(Self::product_words());
        if rng.chance(0.25) {
            format!("{} {}", rng.pick(Self::product_lines()), word)
        } else {
            word.to_string()
        }
    }

    fn surname(rng: &mut TableRng) -> &'static str {
        *rng.pick(Self::surnames())
    }

    fn surnames() -> &'static [&'static str] {
        &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas",
            "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
            "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
            "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green",
            "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter",
            "Roberts", "Phillips", "Evans", "Turner", "Parker", "Collins", "Edwards", "Stewart",
            "Morris", "Murphy", "Cook", "Rogers", "Morgan", "Cooper", "Peterson", "Bailey",
            "Reed", "Kelly", "Howard", "Cox", "Ward", "Richardson", "Watson", "Brooks",
            "Wood", "Bennett", "Gray", "Hughes", "Price", "Sanders", "Patel", "Myers", "Long",
            "Ross", "Foster", "Powell", "Jenkins", "Perry", "Russell", "Sullivan", "Bell",
            "Coleman", "Butler", "Henderson", "Barnes", "Fisher", "Simmons", "Jordan",
            "Reynolds", "Hamilton", "Graham", "Wallace", "Cole", "Hayes", "Gibson", "Ellis",
            "Stevens", "Murray", "Ford", "Marshall", "Owens", "Harrison", "Kennedy", "Wells",
            "Chen", "Freeman", "Webb", "Tucker", "Hawkins", "Crawford", "Olson", "Porter",
            "Hunter", "Shaw", "Snyder", "Mason", "Dixon", "Holmes", "Palmer", "Wagner",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &["LLC", "Inc", "Ltd", "PLC", "Group", "and Sons"]
    }

    fn product_words() -> &'static [&'static str] {
        &[
            "Anchor", "Beacon", "Bracket", "Cable", "Canister", "Compass", "Crate", "Drill",
            "Engine", "Filter", "Gasket", "Gauge", "Hinge", "Kettle", "Lantern", "Lever",
            "Monitor", "Nozzle", "Pallet", "Panel", "Pump", "Ratchet", "Router", "Sensor",
            "Spindle", "Switch", "Tablet", "Thermostat", "Valve", "Widget",
        ]
    }

    fn product_lines() -> &'static [&'static str] {
        &["Pro", "Max", "Eco", "Ultra", "Lite"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, TableSlot};

    #[test]
    fn company_names_are_deterministic() {
        let mut rng1 = RngBank::new(12345).for_table(TableSlot::Customer);
        let mut rng2 = RngBank::new(12345).for_table(TableSlot::Customer);

        for _ in 0..20 {
            assert_eq!(
                NameGenerator::generate_company_name(&mut rng1),
                NameGenerator::generate_company_name(&mut rng2),
                "Same seed should produce same company name"
            );
        }
    }

    #[test]
    fn company_names_lead_with_a_surname() {
        let mut rng = RngBank::new(99).for_table(TableSlot::Customer);

        for _ in 0..50 {
            let name = NameGenerator::generate_company_name(&mut rng);
            assert!(
                NameGenerator::surnames().iter().any(|s| name.starts_with(*s)),
                "Company name without a leading surname: {name}"
            );
        }
    }

    #[test]
    fn product_names_are_capitalized() {
        let mut rng = RngBank::new(12345).for_table(TableSlot::Product);

        for _ in 0..100 {
            let name = NameGenerator::generate_product_name(&mut rng);
            let first = name.chars().next().expect("non-empty product name");
            assert!(first.is_uppercase(), "Product name not capitalized: {name}");
        }
    }
}
