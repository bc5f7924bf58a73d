//! # Seed Fixtures
//!
//! The regulator's seed data set: legal entities with their GS1 company
//! prefixes and the premises registered under them.
//!
//! Some records arrive with a GLN already filled in by hand. Those values are
//! kept as `recorded_gln` so assignment can report the ones whose check digit
//! was wrong.

use serde::Serialize;

/// Role of a legal entity in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Supplier,
    Manufacturer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalEntityFixture {
    pub entity_id: &'static str,
    pub legal_entity_name: &'static str,
    pub actor_type: ActorType,
    pub gs1_prefix: &'static str,
    pub hq_name: Option<&'static str>,
    pub recorded_gln: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiseFixture {
    pub premise_id: &'static str,
    pub premise_name: &'static str,
    pub entity_id: &'static str,
    pub county: &'static str,
    pub location_reference: u64,
    pub recorded_gln: Option<&'static str>,
}

const fn entity(
    entity_id: &'static str,
    legal_entity_name: &'static str,
    actor_type: ActorType,
    gs1_prefix: &'static str,
    hq_name: Option<&'static str>,
    recorded_gln: Option<&'static str>,
) -> LegalEntityFixture {
    LegalEntityFixture {
        entity_id,
        legal_entity_name,
        actor_type,
        gs1_prefix,
        hq_name,
        recorded_gln,
    }
}

const fn premise(
    premise_id: &'static str,
    premise_name: &'static str,
    entity_id: &'static str,
    county: &'static str,
    location_reference: u64,
    recorded_gln: Option<&'static str>,
) -> PremiseFixture {
    PremiseFixture {
        premise_id,
        premise_name,
        entity_id,
        county,
        location_reference,
        recorded_gln,
    }
}

// =============================================================================
// Legal Entities
// =============================================================================

pub const LEGAL_ENTITIES: &[LegalEntityFixture] = &[
    entity(
        "SUP-001",
        "HealthSup Distributors Ltd",
        ActorType::Supplier,
        "73510020",
        Some("HealthSup HQ"),
        Some("7351002000000"),
    ),
    entity(
        "SUP-002",
        "MediCare Pharmaceuticals Kenya",
        ActorType::Supplier,
        "61640010",
        Some("MediCare HQ"),
        Some("6164001000006"),
    ),
    entity(
        "SUP-003",
        "Pharma Imports Ltd",
        ActorType::Supplier,
        "61640020",
        Some("Pharma Imports HQ"),
        None,
    ),
    entity(
        "SUP-004",
        "KEM Pharma Ltd",
        ActorType::Supplier,
        "61640030",
        Some("KEM Pharma HQ"),
        None,
    ),
    entity(
        "SUP-005",
        "Rift Valley Medical Supplies",
        ActorType::Supplier,
        "61640040",
        Some("Rift Valley HQ"),
        Some("6164004000007"),
    ),
    entity(
        "SUP-006",
        "Coast Pharmaceutical Distributors",
        ActorType::Supplier,
        "61640050",
        Some("Coast Pharma HQ"),
        Some("6164005000004"),
    ),
    entity(
        "SUP-007",
        "Lakeside Healthcare Supplies",
        ActorType::Supplier,
        "61640060",
        Some("Lakeside HQ"),
        None,
    ),
    entity(
        "SUP-008",
        "Highlands Drug Wholesalers",
        ActorType::Supplier,
        "61640070",
        Some("Highlands HQ"),
        None,
    ),
    entity(
        "MFG-001",
        "Cosmos Pharmaceuticals Ltd",
        ActorType::Manufacturer,
        "61640080",
        None,
        None,
    ),
    entity(
        "MFG-002",
        "Universal Pharmaceuticals Kenya Ltd",
        ActorType::Manufacturer,
        "61640090",
        None,
        None,
    ),
    entity("MFG-003", "Dawa Life Sciences", ActorType::Manufacturer, "61640100", None, None),
];

// =============================================================================
// Premises
// =============================================================================

pub const PREMISES: &[PremiseFixture] = &[
    premise("SUP-001-WH1", "HealthSup Industrial Area Warehouse", "SUP-001", "Nairobi", 1, None),
    premise("SUP-001-WH2", "LIBWOB CHEMIST", "SUP-001", "Nairobi", 2, Some("7351002000200")),
    premise("SUP-002-WH1", "MediCare Westlands Warehouse", "SUP-002", "Nairobi", 1, None),
    premise("SUP-003-WH1", "Pharma Imports Mombasa Road Depot", "SUP-003", "Nairobi", 1, None),
    premise("SUP-004-HQ", "KEM Pharma Head Office Store", "SUP-004", "Nairobi", 1, None),
    premise("SUP-004-ELD", "KEM Pharma Eldoret Branch", "SUP-004", "Uasin Gishu", 2, None),
    premise("SUP-004-MSA", "KEM Pharma Mombasa Branch", "SUP-004", "Mombasa", 3, None),
    premise("SUP-004-KSM", "KEM Pharma Kisumu Branch", "SUP-004", "Kisumu", 4, None),
    premise("SUP-004-NKR", "KEM Pharma Nakuru Branch", "SUP-004", "Nakuru", 5, None),
];

/// Looks up a legal entity fixture by its entity id.
pub fn legal_entity(entity_id: &str) -> Option<&'static LegalEntityFixture> {
    LEGAL_ENTITIES.iter().find(|e| e.entity_id == entity_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tnt_core::validation::validate_company_prefix;

    #[test]
    fn test_entity_ids_and_prefixes_are_unique() {
        let ids: HashSet<_> = LEGAL_ENTITIES.iter().map(|e| e.entity_id).collect();
        let prefixes: HashSet<_> = LEGAL_ENTITIES.iter().map(|e| e.gs1_prefix).collect();
        assert_eq!(ids.len(), LEGAL_ENTITIES.len());
        assert_eq!(prefixes.len(), LEGAL_ENTITIES.len());
    }

    #[test]
    fn test_prefixes_are_valid() {
        for entity in LEGAL_ENTITIES {
            assert!(validate_company_prefix(entity.gs1_prefix).is_ok(), "{}", entity.entity_id);
        }
    }

    #[test]
    fn test_premises_reference_known_entities() {
        for premise in PREMISES {
            assert!(legal_entity(premise.entity_id).is_some(), "{}", premise.premise_id);
            assert!(premise.location_reference > 0, "{}", premise.premise_id);
        }
    }

    #[test]
    fn test_location_references_unique_per_entity() {
        let pairs: HashSet<_> = PREMISES
            .iter()
            .map(|p| (p.entity_id, p.location_reference))
            .collect();
        assert_eq!(pairs.len(), PREMISES.len());
    }
}
