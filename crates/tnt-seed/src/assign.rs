//! # Identifier Assignment
//!
//! Computes every GS1 identifier of the seed data set.
//!
//! ## Assignment Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Legal entity GLN   company prefix + location reference 0               │
//! │  HQ GLN             same value (suppliers only)                         │
//! │  Premise GLN        company prefix + premise location reference 1..n    │
//! │  Premise SGLN       EPC URI of the premise GLN, no extension            │
//! │  Shipment SSCC      extension 0 + prefix + random serial, unique        │
//! │                     across the whole run                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tnt_core::allocator::SsccAllocator;
use tnt_core::barcode::format_sscc;
use tnt_core::epc::{sgln_epc_uri, sscc_epc_uri, NO_GLN_EXTENSION};
use tnt_core::identifier::{generate_gln, generate_hq_gln};

use crate::error::{SeedError, SeedResult};
use crate::fixtures::{ActorType, LegalEntityFixture, PremiseFixture};

/// Extension digit used for every seeded SSCC.
pub const SHIPMENT_EXTENSION_DIGIT: u8 = 0;

// =============================================================================
// Output Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalEntityRecord {
    pub id: Uuid,
    pub entity_id: String,
    pub legal_entity_name: String,
    pub actor_type: ActorType,
    pub gs1_prefix: String,
    pub legal_entity_gln: String,
    pub hq_name: Option<String>,
    pub hq_gln: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiseRecord {
    pub id: Uuid,
    pub premise_id: String,
    pub premise_name: String,
    pub entity_id: String,
    pub county: String,
    pub gln: String,
    pub sgln: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentRecord {
    pub id: Uuid,
    pub shipment_id: String,
    pub shipper_entity_id: String,
    pub sscc: String,
    pub sscc_display: String,
    pub epc_uri: String,
    pub created_at: DateTime<Utc>,
}

/// A hand-entered GLN that differs from the computed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlnCorrection {
    pub record_id: String,
    pub recorded: String,
    pub assigned: String,
}

/// Everything one seed run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedOutput {
    pub generated_at: DateTime<Utc>,
    pub rng_seed: u64,
    pub legal_entities: Vec<LegalEntityRecord>,
    pub premises: Vec<PremiseRecord>,
    pub shipments: Vec<ShipmentRecord>,
    pub corrections: Vec<GlnCorrection>,
}

// =============================================================================
// Assignment
// =============================================================================

/// Assigns identifiers to the given fixtures and allocates `shipments` SSCCs.
///
/// Shipments are spread round-robin over the suppliers. `rng_seed` is only
/// recorded in the output; `rng` is what draws the SSCC serials.
pub fn assign_identifiers<R: Rng + ?Sized>(
    entities: &[LegalEntityFixture],
    premises: &[PremiseFixture],
    shipments: usize,
    rng_seed: u64,
    rng: &mut R,
) -> SeedResult<SeedOutput> {
    let mut corrections = Vec::new();

    let legal_entities = entities
        .iter()
        .map(|fixture| assign_legal_entity(fixture, &mut corrections))
        .collect::<SeedResult<Vec<_>>>()?;
    info!(count = legal_entities.len(), "Legal entity GLNs assigned");

    let premises = premises
        .iter()
        .map(|fixture| assign_premise(fixture, entities, &mut corrections))
        .collect::<SeedResult<Vec<_>>>()?;
    info!(count = premises.len(), "Premise GLNs assigned");

    let shippers: Vec<&LegalEntityFixture> = entities
        .iter()
        .filter(|e| e.actor_type == ActorType::Supplier)
        .collect();
    let shipments = allocate_shipments(&shippers, shipments, rng)?;
    info!(count = shipments.len(), "Shipment SSCCs allocated");

    if !corrections.is_empty() {
        warn!(count = corrections.len(), "Recorded GLNs had wrong check digits");
    }

    Ok(SeedOutput {
        generated_at: Utc::now(),
        rng_seed,
        legal_entities,
        premises,
        shipments,
        corrections,
    })
}

fn assign_legal_entity(
    fixture: &LegalEntityFixture,
    corrections: &mut Vec<GlnCorrection>,
) -> SeedResult<LegalEntityRecord> {
    let gln = generate_hq_gln(fixture.gs1_prefix)?.into_string();
    debug!(entity_id = fixture.entity_id, gln = %gln, "Legal entity GLN");
    note_correction(fixture.entity_id, fixture.recorded_gln, &gln, corrections);

    let hq_gln = match fixture.actor_type {
        ActorType::Supplier => Some(gln.clone()),
        ActorType::Manufacturer => None,
    };

    Ok(LegalEntityRecord {
        id: Uuid::new_v4(),
        entity_id: fixture.entity_id.to_string(),
        legal_entity_name: fixture.legal_entity_name.to_string(),
        actor_type: fixture.actor_type,
        gs1_prefix: fixture.gs1_prefix.to_string(),
        legal_entity_gln: gln,
        hq_name: fixture.hq_name.map(str::to_string),
        hq_gln,
    })
}

fn assign_premise(
    fixture: &PremiseFixture,
    entities: &[LegalEntityFixture],
    corrections: &mut Vec<GlnCorrection>,
) -> SeedResult<PremiseRecord> {
    let owner = entities
        .iter()
        .find(|e| e.entity_id == fixture.entity_id)
        .ok_or_else(|| SeedError::UnknownEntity {
            entity_id: fixture.entity_id.to_string(),
        })?;

    let gln = generate_gln(owner.gs1_prefix, fixture.location_reference)?.into_string();
    let sgln = sgln_epc_uri(&gln, owner.gs1_prefix.len(), NO_GLN_EXTENSION)?;
    debug!(premise_id = fixture.premise_id, gln = %gln, sgln = %sgln, "Premise GLN");
    note_correction(fixture.premise_id, fixture.recorded_gln, &gln, corrections);

    Ok(PremiseRecord {
        id: Uuid::new_v4(),
        premise_id: fixture.premise_id.to_string(),
        premise_name: fixture.premise_name.to_string(),
        entity_id: fixture.entity_id.to_string(),
        county: fixture.county.to_string(),
        gln,
        sgln,
    })
}

fn note_correction(
    record_id: &str,
    recorded: Option<&str>,
    assigned: &str,
    corrections: &mut Vec<GlnCorrection>,
) {
    if let Some(recorded) = recorded.filter(|r| *r != assigned) {
        warn!(record_id, recorded, assigned, "Recorded GLN corrected");
        corrections.push(GlnCorrection {
            record_id: record_id.to_string(),
            recorded: recorded.to_string(),
            assigned: assigned.to_string(),
        });
    }
}

fn allocate_shipments<R: Rng + ?Sized>(
    shippers: &[&LegalEntityFixture],
    count: usize,
    rng: &mut R,
) -> SeedResult<Vec<ShipmentRecord>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if shippers.is_empty() {
        return Err(SeedError::NoSuppliers);
    }

    let allocators = shippers
        .iter()
        .map(|s| SsccAllocator::new(SHIPMENT_EXTENSION_DIGIT, Some(s.gs1_prefix)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut assigned: HashSet<String> = HashSet::with_capacity(count);
    let mut records = Vec::with_capacity(count);

    for n in 0..count {
        let slot = n % shippers.len();
        let shipper = shippers[slot];

        let sscc = allocators[slot].allocate(&assigned, rng)?.into_string();
        let epc_uri = sscc_epc_uri(&sscc, shipper.gs1_prefix.len())?;
        debug!(shipper = shipper.entity_id, sscc = %sscc, "Shipment SSCC");

        assigned.insert(sscc.clone());
        records.push(ShipmentRecord {
            id: Uuid::new_v4(),
            shipment_id: format!("SHP-{:04}", n + 1),
            shipper_entity_id: shipper.entity_id.to_string(),
            sscc_display: format_sscc(&sscc),
            sscc,
            epc_uri,
            created_at: Utc::now(),
        });
    }

    Ok(records)
}

// =============================================================================
// Unit Tests
// =============================================================================
