//! Data-driven icon selection tables.
//!
//! Each table is evaluated top-down on the first matching test. The display
//! lambda chain, the LVGL lambda chain, the Jinja chain of the drawing
//! protocols and the glyph requirements are all generated from the same
//! table, so the backends cannot disagree on thresholds or fallback.

use crate::registry::IconRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierTest {
    /// `value >= n`
    AtLeast(i32),
    /// `state == s`
    State(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub test: TierTest,
    pub code: &'static str,
    pub name: &'static str,
}

const fn at_least(n: i32, code: &'static str, name: &'static str) -> Tier {
    Tier { test: TierTest::AtLeast(n), code, name }
}

const fn state(s: &'static str, code: &'static str, name: &'static str) -> Tier {
    Tier { test: TierTest::State(s), code, name }
}

#[derive(Debug)]
pub struct TierTable {
    pub tiers: &'static [Tier],
    pub fallback: Tier,
}

pub static BATTERY: TierTable = TierTable {
    tiers: &[
        at_least(95, "F0079", "battery"),
        at_least(85, "F0082", "battery-90"),
        at_least(75, "F0081", "battery-80"),
        at_least(65, "F0080", "battery-70"),
        at_least(55, "F007F", "battery-60"),
        at_least(45, "F007E", "battery-50"),
        at_least(35, "F007D", "battery-40"),
        at_least(25, "F007C", "battery-30"),
        at_least(15, "F007B", "battery-20"),
        at_least(5, "F007A", "battery-10"),
    ],
    fallback: Tier { test: TierTest::AtLeast(i32::MIN), code: "F0083", name: "battery-alert" },
};

pub static WIFI: TierTable = TierTable {
    tiers: &[
        at_least(-50, "F0928", "wifi-strength-4"),
        at_least(-60, "F0925", "wifi-strength-3"),
        at_least(-75, "F0922", "wifi-strength-2"),
        at_least(-100, "F091F", "wifi-strength-1"),
    ],
    fallback: Tier {
        test: TierTest::AtLeast(i32::MIN),
        code: "F092B",
        name: "wifi-strength-alert-outline",
    },
};

pub static WEATHER: TierTable = TierTable {
    tiers: &[
        state("clear-night", "F0594", "weather-night"),
        state("cloudy", "F0590", "weather-cloudy"),
        state("exceptional", "F0026", "alert"),
        state("fog", "F0591", "weather-fog"),
        state("hail", "F0592", "weather-hail"),
        state("lightning", "F0593", "weather-lightning"),
        state("lightning-rainy", "F067E", "weather-lightning-rainy"),
        state("partlycloudy", "F0595", "weather-partly-cloudy"),
        state("pouring", "F0596", "weather-pouring"),
        state("rainy", "F0597", "weather-rainy"),
        state("snowy", "F0598", "weather-snowy"),
        state("snowy-rainy", "F067F", "weather-snowy-rainy"),
        state("sunny", "F0599", "weather-sunny"),
        state("windy", "F059D", "weather-windy"),
        state("windy-variant", "F059E", "weather-windy-variant"),
    ],
    fallback: Tier { test: TierTest::State(""), code: "F0599", name: "weather-sunny" },
};

impl TierTest {
    fn cpp(self, subject: &str) -> String {
        match self {
            Self::AtLeast(n) => format!("{subject} >= {n}"),
            Self::State(s) => format!("{subject} == \"{s}\""),
        }
    }

    fn jinja(self, subject: &str) -> String {
        match self {
            Self::AtLeast(n) => format!("{subject} >= {n}"),
            Self::State(s) => format!("{subject} == '{s}'"),
        }
    }
}

impl TierTable {
    /// Tier chosen for a numeric level.
    #[must_use]
    pub fn select_level(&self, level: f64) -> &Tier {
        self.tiers
            .iter()
            .find(|tier| matches!(tier.test, TierTest::AtLeast(n) if level >= f64::from(n)))
            .unwrap_or(&self.fallback)
    }

    /// Tier chosen for a state string.
    #[must_use]
    pub fn select_state(&self, value: &str) -> &Tier {
        self.tiers
            .iter()
            .find(|tier| matches!(tier.test, TierTest::State(s) if s == value))
            .unwrap_or(&self.fallback)
    }

    /// Every glyph the table can select, in table order, fallback last.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = Vec::with_capacity(self.tiers.len() + 1);
        for code in self.tiers.iter().map(|tier| tier.code).chain([self.fallback.code]) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// Registers every glyph of the table at `size`.
    pub fn track_all(&self, icons: &mut IconRegistry, size: u32) {
        for code in self.codes() {
            icons.track_icon(code, size);
        }
    }

    /// Protocol icon name for a codepoint, if the table knows it.
    #[must_use]
    pub fn name_of(&self, code: &str) -> Option<&'static str> {
        self.tiers
            .iter()
            .chain([&self.fallback])
            .find(|tier| tier.code.eq_ignore_ascii_case(code))
            .map(|tier| tier.name)
    }

    /// C++ if-chain assigning a glyph literal to `target`.
    #[must_use]
    pub fn cpp_chain(&self, subject: &str, target: &str) -> Vec<String> {
        let mut lines: Vec<String> = self
            .tiers
            .iter()
            .enumerate()
            .map(|(index, tier)| {
                let lead = if index == 0 { "if" } else { "else if" };
                format!(
                    "{lead} ({}) {target} = \"{}\";",
                    tier.test.cpp(subject),
                    IconRegistry::escape(tier.code)
                )
            })
            .collect();
        lines.push(format!(
            "else {target} = \"{}\";",
            IconRegistry::escape(self.fallback.code)
        ));
        lines
    }

    /// C++ lambda body returning the glyph literal.
    #[must_use]
    pub fn lambda_chain(&self, subject: &str) -> Vec<String> {
        let mut lines: Vec<String> = self
            .tiers
            .iter()
            .map(|tier| {
                format!(
                    "if ({}) return \"{}\";",
                    tier.test.cpp(subject),
                    IconRegistry::escape(tier.code)
                )
            })
            .collect();
        lines.push(format!("return \"{}\";", IconRegistry::escape(self.fallback.code)));
        lines
    }

    /// Jinja template rendering the icon name for `value_expr`.
    #[must_use]
    pub fn jinja(&self, value_expr: &str) -> String {
        let mut out = format!("{{% set v = {value_expr} %}}");
        for (index, tier) in self.tiers.iter().enumerate() {
            let lead = if index == 0 { "if" } else { "elif" };
            out.push_str(&format!("{{% {lead} {} %}}{}", tier.test.jinja("v"), tier.name));
        }
        out.push_str(&format!("{{% else %}}{}{{% endif %}}", self.fallback.name));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_84_is_the_80_tier() {
        let tier = BATTERY.select_level(84.0);
        assert_eq!(tier.code, "F0081");
        assert_eq!(tier.name, "battery-80");
        assert_eq!(BATTERY.select_level(2.0).name, "battery-alert");
    }

    #[test]
    fn weather_falls_back_to_sunny() {
        assert_eq!(WEATHER.select_state("rainy").code, "F0597");
        assert_eq!(WEATHER.select_state("tornado").name, "weather-sunny");
        assert_eq!(WEATHER.codes().len(), 15);
    }

    #[test]
    fn chains_keep_table_order() {
        let chain = WIFI.cpp_chain("dbm", "glyph");
        assert_eq!(chain[0], "if (dbm >= -50) glyph = \"\\U000F0928\";");
        assert_eq!(chain[4], "else glyph = \"\\U000F092B\";");
        let jinja = WIFI.jinja("states('sensor.rssi') | float(-100)");
        assert!(jinja.starts_with("{% set v = states('sensor.rssi') | float(-100) %}{% if v >= -50 %}"));
        assert!(jinja.ends_with("{% else %}wifi-strength-alert-outline{% endif %}"));
    }
}
