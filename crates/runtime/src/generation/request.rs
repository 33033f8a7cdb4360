//! The structured request sent to the text generator, and its prompt.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use shadow_core::{Shadow, SystemState};

/// System message sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert One Piece + D&D homebrew designer. You create powerful but playable shadow abilities with cool names and clear mechanics.";

const NO_SHADOWS: &str = "No shadows currently stored.";
const NO_BUFFS: &str = "No active buffs.";
const NO_NOTES: &str = "(none)";
const UNNAMED: &str = "(Unnamed)";

/// One stored shadow as the generator sees it.
///
/// Numbers are carried as sent and printed verbatim into the prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowLine {
    pub name: String,
    pub shadow_level: Number,
    pub raw_might: Number,
    #[serde(rename = "ttLabel")]
    pub template_label: String,
    pub active: bool,
}

impl Default for ShadowLine {
    fn default() -> Self {
        Self {
            name: String::new(),
            shadow_level: Number::from(0u8),
            raw_might: Number::from(0u8),
            template_label: String::new(),
            active: false,
        }
    }
}

impl From<&Shadow> for ShadowLine {
    fn from(shadow: &Shadow) -> Self {
        Self {
            name: shadow.name.clone(),
            shadow_level: shadow.shadow_level.into(),
            raw_might: shadow.raw_might.into(),
            template_label: shadow.template_label().to_string(),
            active: shadow.active,
        }
    }
}

/// Request body accepted by [`super::GenerationHandler`].
///
/// Every field is optional on the wire; absent ones read as empty or zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    pub shadows: Vec<ShadowLine>,
    #[serde(alias = "totalAsp")]
    pub total_spu: Number,
    #[serde(alias = "spentAsp")]
    pub spent_spu: Number,
    #[serde(alias = "availableAsp")]
    pub available_spu: Number,
    pub selected_buff_ids: Vec<String>,
    pub notes: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            shadows: Vec::new(),
            total_spu: Number::from(0u64),
            spent_spu: Number::from(0u64),
            available_spu: Number::from(0u64),
            selected_buff_ids: Vec::new(),
            notes: String::new(),
        }
    }
}

impl GenerationRequest {
    /// Snapshot of `state`: every shadow, the power pool, and the buffs held
    /// by the current target.
    pub fn from_state(state: &SystemState, notes: &str) -> Self {
        let pool = shadow_core::PowerPool::compute(&state.shadows, &state.targets, &state.catalog);
        let selected_buff_ids = state
            .current_target()
            .map(|target| {
                target
                    .stacks
                    .iter()
                    .map(|(id, _)| id.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            shadows: state.shadows.iter().map(ShadowLine::from).collect(),
            total_spu: pool.total.into(),
            spent_spu: pool.spent.into(),
            available_spu: pool.available.into(),
            selected_buff_ids,
            notes: notes.trim().to_string(),
        }
    }

    fn shadow_summary(&self) -> String {
        if self.shadows.is_empty() {
            return NO_SHADOWS.to_string();
        }
        self.shadows
            .iter()
            .map(|s| {
                format!(
                    "Name: {} | SL {} | Raw Might {} | Template: {} | Active: {}",
                    if s.name.is_empty() { UNNAMED } else { s.name.as_str() },
                    s.shadow_level,
                    s.raw_might,
                    s.template_label,
                    if s.active { "Yes" } else { "No" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The user message.
    pub fn prompt(&self) -> String {
        let buffs = if self.selected_buff_ids.is_empty() {
            NO_BUFFS.to_string()
        } else {
            self.selected_buff_ids.join(", ")
        };
        let notes = if self.notes.is_empty() {
            NO_NOTES
        } else {
            self.notes.as_str()
        };

        format!(
            r#"
You are helping design powerful but playable One Piece-style shadow abilities for a D&D-like campaign.

Current Shadow Fruit state:

Total ASP: {total}
Spent ASP: {spent}
Available ASP: {available}

Shadows:
{shadows}

Selected buffs (IDs or names): {buffs}

Extra notes / theme from user:
{notes}

TASK:
1. Propose 3–5 unique, named shadow techniques (attacks or utility), using cool One Piece-style names.
   - For each, give: Name, Short description, Suggested damage dice or mechanical effect, and any save/DC if relevant.
2. Propose 1–3 transformation forms that fit the current level of power (based on ASP and shadows).
   - Briefly describe the form, what changes visually, and what it mechanically boosts.
3. Propose 1–2 special abilities for reanimated corpses powered by these shadows.
   - Make them flavorful and tied to the idea that the corpse has physical durability plus shadow-based powers.

Output in a clean, game-usable text format, with clear headings and bullet points. Avoid referencing D&D rules directly by name (no "CR"), but it's okay to use generic terms like "attack roll", "saving throw", "DC", and "action".
"#,
            total = self.total_spu,
            spent = self.spent_spu,
            available = self.available_spu,
            shadows = self.shadow_summary(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_request_uses_placeholders() {
        let prompt = GenerationRequest::default().prompt();
        assert!(prompt.contains("Shadows:\nNo shadows currently stored.\n"));
        assert!(prompt.contains("Selected buffs (IDs or names): No active buffs."));
        assert!(prompt.contains("Extra notes / theme from user:\n(none)\n"));
        assert!(prompt.contains("Total ASP: 0"));
    }

    #[test]
    fn shadow_lines_render_one_per_row() {
        let request = GenerationRequest {
            shadows: vec![
                ShadowLine {
                    name: "Oars".into(),
                    shadow_level: 9u8.into(),
                    raw_might: 10u8.into(),
                    template_label: "Giant".into(),
                    active: true,
                },
                ShadowLine {
                    shadow_level: 1u8.into(),
                    ..ShadowLine::default()
                },
            ],
            selected_buff_ids: vec!["temp20".into(), "move10".into()],
            ..GenerationRequest::default()
        };
        let prompt = request.prompt();
        assert!(prompt.contains(
            "Name: Oars | SL 9 | Raw Might 10 | Template: Giant | Active: Yes\nName: (Unnamed) | SL 1 | Raw Might 0 | Template:  | Active: No"
        ));
        assert!(prompt.contains("temp20, move10"));
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "totalAsp": 300,
            "spentAsp": 40,
            "availableAsp": 260,
            "notes": "moody"
        }))
        .unwrap();
        assert_eq!(request.total_spu, Number::from(300u64));
        assert_eq!(request.available_spu, Number::from(260u64));
        assert_eq!(request.notes, "moody");
        assert!(request.shadows.is_empty());
    }

    #[test]
    fn fractional_numbers_are_printed_as_sent() {
        let request: GenerationRequest = serde_json::from_value(json!({
            "shadows": [{ "name": "Oars", "shadowLevel": 300, "rawMight": 12.5, "ttLabel": "Giant" }],
            "totalAsp": 300.5
        }))
        .unwrap();
        let prompt = request.prompt();
        assert!(prompt.contains("Total ASP: 300.5\n"));
        assert!(prompt.contains("Name: Oars | SL 300 | Raw Might 12.5 | Template: Giant | Active: No"));
    }
}
