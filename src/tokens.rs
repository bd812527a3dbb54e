//! Tailwind design tokens: palette, font and animation extensions plus the
//! class-based dark mode strategy.

use std::collections::BTreeMap;

use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::JsValue;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    pub dark_mode: &'static str,
    pub theme: Theme,
}

#[derive(Serialize, Clone, Debug)]
pub struct Theme {
    pub extend: ThemeExtend,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtend {
    pub font_family: BTreeMap<&'static str, Vec<&'static str>>,
    pub colors: Colors,
    pub animation: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize, Clone, Debug)]
pub struct Colors {
    pub brand: BTreeMap<&'static str, &'static str>,
    pub dark: DarkSurface,
}

#[derive(Serialize, Clone, Debug)]
pub struct DarkSurface {
    pub bg: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
}

const BRAND: [(&str, &str); 11] = [
    ("50", "#f5f3ff"),
    ("100", "#ede9fe"),
    ("200", "#ddd6fe"),
    ("300", "#c4b5fd"),
    ("400", "#a78bfa"),
    ("500", "#8b5cf6"),
    ("600", "#7c3aed"),
    ("700", "#6d28d9"),
    ("800", "#5b21b6"),
    ("900", "#4c1d95"),
    ("950", "#2e1065"),
];

impl Default for TailwindConfig {
    fn default() -> Self {
        Self {
            dark_mode: "class",
            theme: Theme {
                extend: ThemeExtend {
                    font_family: BTreeMap::from([("sans", vec!["Inter", "sans-serif"])]),
                    colors: Colors {
                        brand: BTreeMap::from(BRAND),
                        // slate 900 / 800 / 700
                        dark: DarkSurface {
                            bg: "#0f172a",
                            surface: "#1e293b",
                            border: "#334155",
                        },
                    },
                    animation: BTreeMap::from([
                        ("spin-slow", "spin 3s linear infinite"),
                        ("bounce-slow", "bounce 3s infinite"),
                    ]),
                },
            },
        }
    }
}

/// Hands the tokens to the Tailwind CDN runtime when the page loads it.
pub fn install() {
    let win: JsValue = window().into();
    let tailwind = match js_sys::Reflect::get(&win, &JsValue::from_str("tailwind")) {
        Ok(value) if value.is_object() => value,
        _ => {
            log::debug!("tailwind runtime not present, skipping token install");
            return;
        }
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let config = match TailwindConfig::default().serialize(&serializer) {
        Ok(config) => config,
        Err(err) => {
            log::error!("could not serialize design tokens: {err}");
            return;
        }
    };
    if js_sys::Reflect::set(&tailwind, &JsValue::from_str("config"), &config).is_err() {
        log::error!("could not assign tailwind.config");
    }
}
