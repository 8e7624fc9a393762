//! Prompt construction and response cleanup for language-model oracles.

use std::fmt::Write;

use agent_core::{Location, Threat};

use crate::api::HealthSnapshot;

fn format_location(location: Location) -> String {
    format!("({:.2}, {:.2}, {:.2})", location.x, location.y, location.z)
}

fn format_health(health: &HealthSnapshot) -> String {
    let mut out = String::new();
    for (i, (part, percent)) in health.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{part}: {percent:.1}%");
    }
    out
}

pub(crate) fn combat_prompt(
    location: Location,
    threat: &Threat,
    health: &HealthSnapshot,
    weapons: &[String],
) -> String {
    format!(
        r#"You are the AI core of a T800 combat robot. Analyze the following situation and make a tactical decision.

Current Location: {location}
Active Threat: {id} (Severity: {severity}, Health: {threat_health:.1}, Location: {threat_location})
Distance To Threat: {distance:.2} meters
Health Status: {health}
Available Weapons: {weapons}

Make a tactical decision considering:
1. Distance to threat
2. Threat severity
3. Current health status
4. Available weapons
5. Strategic advantage

IMPORTANT: Respond with ONLY a valid JSON object in the following format:
{{
    "action": "move", "attack", "defend", or "retreat",
    "target": "target ID if applicable",
    "weapon": "weapon to use if attacking",
    "priority": number between 1-10,
    "confidence": number between 0-1,
    "explanation": "brief explanation of the decision"
}}

Do not include any text before or after the JSON object."#,
        location = format_location(location),
        id = threat.id,
        severity = threat.severity,
        threat_health = threat.health,
        threat_location = format_location(threat.location),
        distance = location.distance(threat.location),
        health = format_health(health),
        weapons = weapons.join(", "),
    )
}

pub(crate) fn engagement_prompt(
    threat: &Threat,
    location: Location,
    health: &HealthSnapshot,
) -> String {
    format!(
        r#"Analyze if the T800 should proactively engage this threat.

Threat: {id} (Severity: {severity}, Location: {threat_location})
Current Location: {location}
Distance To Threat: {distance:.2} meters
Health Status: {health}

Consider:
1. Threat severity
2. Distance
3. Current health status
4. Strategic advantage

IMPORTANT: Respond with ONLY a valid JSON object in the following format:
{{
    "should_engage": true or false,
    "confidence": number between 0-1,
    "explanation": "brief explanation"
}}

Do not include any text before or after the JSON object."#,
        id = threat.id,
        severity = threat.severity,
        threat_location = format_location(threat.location),
        location = format_location(location),
        distance = location.distance(threat.location),
        health = format_health(health),
    )
}

/// Strips Markdown code fences models like to wrap JSON in.
pub(crate) fn clean_response(response: &str) -> &str {
    let trimmed = response.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}
