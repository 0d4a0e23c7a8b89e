//! Recommended next actions derived from recent incidents.
//!
//! Rules, applied in order until three actions exist:
//! 1. The most critical area since the window start (at least three
//!    incidents, ranked by severe count then total) gets an audit or a
//!    protocol reinforcement depending on its severe count.
//! 2. The most affected body part gets a PPE review.
//! 3. Default preventive maintenance fills the remaining slots.

use super::safety::is_severe;
use super::{count_by, ranked};
use crate::api::types::{Accident, ActionPriority, ActionStatus, NextAction};
use crate::utils::config::{ACTIONS_COUNT, ACTIONS_REFERENCE_DATE, ACTIONS_WINDOW_START, UNSPECIFIED_BODY_PART};
use chrono::{Days, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

/// Incidents an area needs before it is considered
const MIN_AREA_INCIDENTS: u64 = 3;
const AUDIT_SEVERE_THRESHOLD: u64 = 5;
const REINFORCE_SEVERE_THRESHOLD: u64 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AreaSummary {
    local: String,
    country: String,
    incidents: u64,
    severe: u64,
}

/// Compute the recommended actions
///
/// **Public** - local equivalent of `/api/next-actions`
///
/// Always returns exactly three actions.
pub fn next_actions(accidents: &[Accident]) -> Vec<NextAction> {
    let reference = ymd(ACTIONS_REFERENCE_DATE);
    let window_start = ymd(ACTIONS_WINDOW_START);

    let recent: Vec<&Accident> = accidents
        .iter()
        .filter(|a| a.day().is_some_and(|d| d >= window_start))
        .collect();

    debug!("{} incidents since {}", recent.len(), window_start);

    let mut actions = Vec::with_capacity(ACTIONS_COUNT);

    if let Some(area) = critical_areas(&recent).first() {
        actions.extend(area_action(area, reference));
    }

    if actions.len() < ACTIONS_COUNT {
        if let Some((part, count)) = top_body_part(&recent) {
            actions.push(body_part_action(&part, count, reference));
        }
    }

    while actions.len() < ACTIONS_COUNT {
        actions.push(default_action(reference));
    }

    actions.truncate(ACTIONS_COUNT);
    actions
}

fn critical_areas(recent: &[&Accident]) -> Vec<AreaSummary> {
    let mut areas: BTreeMap<(String, String), AreaSummary> = BTreeMap::new();

    for accident in recent {
        let local = accident.local.clone().unwrap_or_default();
        let country = accident.country.clone().unwrap_or_default();
        let area = areas
            .entry((local.clone(), country.clone()))
            .or_insert_with(|| AreaSummary { local, country, incidents: 0, severe: 0 });
        area.incidents += 1;
        if is_severe(accident) {
            area.severe += 1;
        }
    }

    let mut areas: Vec<AreaSummary> = areas
        .into_values()
        .filter(|a| a.incidents >= MIN_AREA_INCIDENTS)
        .collect();
    areas.sort_by(|a, b| b.severe.cmp(&a.severe).then(b.incidents.cmp(&a.incidents)));
    areas
}

fn area_action(area: &AreaSummary, reference: NaiveDate) -> Option<NextAction> {
    let location = format!("{} ({})", area.local, country_code(&area.country));

    if area.severe >= AUDIT_SEVERE_THRESHOLD {
        Some(NextAction {
            priority: ActionPriority::Urgent,
            status: ActionStatus::InProgress,
            title: "Auditoria de segurança completa".to_string(),
            location,
            responsible: "Coordenador de Segurança".to_string(),
            deadline: deadline(reference, 2),
            description: format!("{} acidentes graves registrados nesta localidade", area.severe),
        })
    } else if area.severe >= REINFORCE_SEVERE_THRESHOLD {
        Some(NextAction {
            priority: ActionPriority::High,
            status: ActionStatus::Planned,
            title: "Reforço de protocolos de segurança".to_string(),
            location,
            responsible: "Supervisor de Operações".to_string(),
            deadline: deadline(reference, 5),
            description: format!("Área com {} acidentes graves recentes", area.severe),
        })
    } else {
        None
    }
}

fn top_body_part(recent: &[&Accident]) -> Option<(String, u64)> {
    let by_part = count_by(
        recent
            .iter()
            .filter_map(|a| a.body_part.as_deref())
            .filter(|p| *p != UNSPECIFIED_BODY_PART),
    );

    ranked(by_part)
        .into_iter()
        .next()
        .map(|(part, count)| (part.to_string(), count))
}

fn body_part_action(part: &str, count: u64, reference: NaiveDate) -> NextAction {
    let lower = part.to_lowercase();
    NextAction {
        priority: ActionPriority::Medium,
        status: ActionStatus::Planned,
        title: format!("Revisão de EPI: {}", lower),
        location: "Setores de produção".to_string(),
        responsible: "Gestor de Equipamentos".to_string(),
        deadline: deadline(reference, 10),
        description: format!("{} acidentes afetaram {}. Sugestão: {}", count, lower, ppe_suggestion(part)),
    }
}

fn default_action(reference: NaiveDate) -> NextAction {
    NextAction {
        priority: ActionPriority::Medium,
        status: ActionStatus::Planned,
        title: "Manutenção preventiva de equipamentos".to_string(),
        location: "Todas as unidades".to_string(),
        responsible: "Equipe de Manutenção".to_string(),
        deadline: deadline(reference, 14),
        description: "Inspeção regular de equipamentos e instalações".to_string(),
    }
}

/// Protective equipment suggested for a body part
pub fn ppe_suggestion(part: &str) -> &'static str {
    match part {
        "Mãos" => "luvas de proteção reforçadas",
        "Pés" => "calçados de segurança antiderrapantes",
        "Olhos" => "óculos de proteção e protetores faciais",
        "Cabeça" => "capacetes e proteção craniana",
        "Tronco" => "coletes de proteção",
        _ => "EPIs adequados",
    }
}

/// Two-letter code shown next to a location; unknown countries map to BR
pub fn country_code(country: &str) -> &'static str {
    match country {
        "EUA" => "US",
        "Canadá" => "CA",
        _ => "BR",
    }
}

fn deadline(reference: NaiveDate, days: u64) -> String {
    reference
        .checked_add_days(Days::new(days))
        .unwrap_or(reference)
        .format("%d/%m/%Y")
        .to_string()
}

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
