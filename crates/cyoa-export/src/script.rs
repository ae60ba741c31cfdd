//! Script literals and the generated rules prelude.
//!
//! The exported page plays adventures with an embedded script. Its numbers
//! and log messages are not written by hand: [`rules_script`] renders them
//! from the battle crate, so the terminal player and the page follow the
//! same rules.

use cyoa_battle::{
    BATTLE_END_DELAY_MS, ENEMY_DAMAGE, ENEMY_TURN_DELAY_MS, PLAYER_MAX_HEALTH, messages,
};
use cyoa_core::document::{
    DEFAULT_ATTACK_DAMAGE_MAX, DEFAULT_ATTACK_DAMAGE_MIN, DEFAULT_ENEMY_HEALTH,
    DEFAULT_ENEMY_NAME,
};
use cyoa_core::{ControlToken, START_SCENE};
use serde::Serialize;

use crate::error::ExportResult;

/// Where `make_your_own` leads.
pub const EDITOR_URL: &str = "/code";
/// Where `go_home` leads.
pub const HOME_URL: &str = "/";

/// Destination URL of a control token.
pub fn control_token_url(token: ControlToken) -> &'static str {
    match token {
        ControlToken::MakeYourOwn => EDITOR_URL,
        ControlToken::GoHome => HOME_URL,
    }
}

/// Serialize `value` as a JavaScript literal that is safe inside a
/// `<script>` element.
///
/// `<`, `>` and `&` become `\u` escapes so no string in the document can
/// close the element. U+2028 and U+2029 are escaped for older engines that
/// reject them in string literals.
pub fn script_literal<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

// Backticks and backslashes are escaped; `${…}` placeholders are kept.
fn template_literal(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('`', "\\`");
    format!("`{escaped}`")
}

/// The `RULES`, `CONTROL_TOKENS` and `MESSAGES` constants of the page script.
pub fn rules_script() -> ExportResult<String> {
    let rules = serde_json::json!({
        "startScene": START_SCENE,
        "playerMaxHealth": PLAYER_MAX_HEALTH,
        "enemyDamageMin": ENEMY_DAMAGE.min(),
        "enemyDamageMax": ENEMY_DAMAGE.max(),
        "enemyTurnDelayMs": ENEMY_TURN_DELAY_MS,
        "battleEndDelayMs": BATTLE_END_DELAY_MS,
        "defaultEnemyName": DEFAULT_ENEMY_NAME,
        "defaultEnemyHealth": DEFAULT_ENEMY_HEALTH,
        "defaultAttackDamageMin": DEFAULT_ATTACK_DAMAGE_MIN,
        "defaultAttackDamageMax": DEFAULT_ATTACK_DAMAGE_MAX,
    });
    let tokens: serde_json::Map<String, serde_json::Value> =
        [ControlToken::MakeYourOwn, ControlToken::GoHome]
            .into_iter()
            .map(|token| (token.as_str().to_string(), control_token_url(token).into()))
            .collect();

    let mut out = String::new();
    out.push_str(&format!("const RULES = {};\n", script_literal(&rules)?));
    out.push_str(&format!("const CONTROL_TOKENS = {};\n", script_literal(&tokens)?));
    out.push_str("const MESSAGES = {\n");
    out.push_str(&format!(
        "  appears: (enemy) => {},\n",
        template_literal(&messages::appears("${enemy}"))
    ));
    out.push_str(&format!(
        "  playerAttack: (damage) => {},\n",
        template_literal(&messages::player_attack("${damage}"))
    ));
    out.push_str(&format!(
        "  victory: (enemy) => {},\n",
        template_literal(&messages::victory("${enemy}"))
    ));
    out.push_str(&format!(
        "  enemyAttack: (enemy, damage) => {},\n",
        template_literal(&messages::enemy_attack("${enemy}", "${damage}"))
    ));
    out.push_str(&format!(
        "  enemyAttackBlocked: (enemy, base, taken) => {},\n",
        template_literal(&messages::enemy_attack_blocked(
            "${enemy}", "${base}", "${taken}"
        ))
    ));
    out.push_str(&format!("  defend: {},\n", script_literal(messages::DEFEND)?));
    out.push_str(&format!("  defeat: {},\n", script_literal(messages::DEFEAT)?));
    out.push_str("};\n");
    Ok(out)
}
