use regex::Regex;
use std::sync::OnceLock;

/// A rupiah amount held in sen (hundredths), so fractions survive parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amount {
    sen: i128,
}

impl Amount {
    pub fn whole(rupiah: i64) -> Self {
        Self {
            sen: i128::from(rupiah) * 100,
        }
    }

    pub fn from_sen(sen: i128) -> Self {
        Self { sen }
    }

    pub fn sen(self) -> i128 {
        self.sen
    }
}

/// Formats an amount the way the `id-ID` locale does: `.` groups thousands,
/// `,` separates at most two fraction digits (trailing zeros dropped), and a
/// non-breaking space follows `Rp`.
pub fn format_rupiah(amount: Amount) -> String {
    let abs = amount.sen.unsigned_abs();
    let digits = (abs / 100).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    match abs % 100 {
        0 => {}
        frac if frac % 10 == 0 => out.push_str(&format!(",{}", frac / 10)),
        frac => out.push_str(&format!(",{frac:02}")),
    }
    let sign = if amount.sen < 0 { "-" } else { "" };
    format!("{sign}Rp\u{a0}{out}")
}

/// Reads an amount from element text. Plain numbers use `.` as the decimal
/// point (`"1500.75"`); text carrying `Rp`, a `,` or several dots is read as
/// `id-ID` (`"Rp 1.500,75"`, `"1.500.000"`). Fractions round to the sen.
pub fn parse_amount(text: &str) -> Option<Amount> {
    static RE_PLAIN: OnceLock<Regex> = OnceLock::new();
    static RE_LOCALE: OnceLock<Regex> = OnceLock::new();
    let re_plain = RE_PLAIN.get_or_init(|| Regex::new(r"^(-?)(\d+)(?:\.(\d+))?$").unwrap());
    let re_locale = RE_LOCALE.get_or_init(|| {
        Regex::new(r"^(-?)\s*(?:[Rr][Pp]\.?)?\s*(-?)(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d+))?$")
            .unwrap()
    });

    let text = text.trim();
    if let Some(caps) = re_plain.captures(text) {
        let negative = !caps[1].is_empty();
        return assemble(negative, &caps[2], caps.get(3).map(|m| m.as_str()));
    }
    let caps = re_locale.captures(text)?;
    let negative = !caps[1].is_empty() || !caps[2].is_empty();
    let whole = caps[3].replace('.', "");
    assemble(negative, &whole, caps.get(4).map(|m| m.as_str()))
}

fn assemble(negative: bool, whole: &str, fraction: Option<&str>) -> Option<Amount> {
    let whole: i128 = whole.parse().ok()?;
    let fraction = fraction.unwrap_or("");
    let digit = |idx: usize| {
        fraction
            .as_bytes()
            .get(idx)
            .map_or(0, |b| i128::from(b - b'0'))
    };
    let mut sen = whole.checked_mul(100)?.checked_add(digit(0) * 10 + digit(1))?;
    if digit(2) >= 5 {
        sen = sen.checked_add(1)?;
    }
    Some(Amount::from_sen(if negative { -sen } else { sen }))
}
