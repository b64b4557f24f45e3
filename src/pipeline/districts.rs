//! District level: decode, correct, validate, and repair the known defects.

use std::collections::BTreeSet;

use geo::{Area, MultiPolygon, Polygon, Validation};

use crate::{
    amap::{assemble, nesting_depths, parse_pieces, shorten_district_name, RawDistrict},
    config::PipelineConfig,
    error::{AmapError, Result},
    geom::{gcj_geometry_to_wgs, invalid_groups, repair_member, round_geometry, Coverage},
    types::{Adcode, AdminRecord, DistrictProperties, Layer, Properties},
};

/// Decode one district's polyline into a corrected, rounded geometry.
///
/// Each piece is corrected and rounded on its own, then the pieces at every
/// nesting depth must form a valid coverage before they are assembled.
pub fn decode_district(raw: &RawDistrict, precision: u32) -> Result<MultiPolygon<f64>> {
    let adcode = raw.properties.district_adcode;
    let polyline = raw.polyline.as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AmapError::MissingData(format!("adcode={adcode} has no polyline")))?;

    let pieces: Vec<Polygon<f64>> = parse_pieces(polyline)
        .map_err(|e| match e {
            AmapError::Decode(msg) => AmapError::Decode(format!("adcode={adcode}: {msg}")),
            other => other,
        })?
        .iter()
        .map(|piece| gcj_geometry_to_wgs(piece, precision))
        .collect();

    let invalid: Vec<String> = pieces.iter().enumerate()
        .filter(|(_, piece)| !piece.is_valid())
        .map(|(i, _)| format!("{adcode}#{i}"))
        .collect();
    if !invalid.is_empty() {
        return Err(AmapError::invalid("district fragments", invalid));
    }

    let depths = nesting_depths(&pieces);
    let overlapping = invalid_groups(
        depths.iter().zip(&pieces).map(|(&d, piece)| (d, MultiPolygon(vec![piece.clone()])))
    );
    if !overlapping.is_empty() {
        return Err(AmapError::invalid(
            "district fragments",
            overlapping.iter().map(|d| format!("{adcode}@depth{d}")),
        ));
    }

    Ok(round_geometry(&assemble(&pieces), precision))
}

/// Repair the listed defective districts from their neighbors.
///
/// Every listed adcode present in the layer must actually violate the
/// coverage, and every violation must involve a listed adcode. Listed
/// adcodes absent from the layer are ignored.
pub fn repair_layer(
    mut layer: Layer<DistrictProperties>,
    defective: &[Adcode],
    precision: u32,
) -> Result<Layer<DistrictProperties>> {
    let report = Coverage::new(layer.geometries()).check();
    let offenders: BTreeSet<usize> = report.offenders().into_iter().collect();

    let mut listed: Vec<(Adcode, usize)> = Vec::new();
    for &adcode in defective {
        match layer.position(adcode) {
            Some(idx) => listed.push((adcode, idx)),
            None => log::debug!("defective adcode {adcode} not in this layer, skipping"),
        }
    }
    let listed_idx: BTreeSet<usize> = listed.iter().map(|&(_, idx)| idx).collect();

    let stale: Vec<Adcode> = listed.iter()
        .filter(|(_, idx)| !offenders.contains(idx))
        .map(|&(adcode, _)| adcode)
        .collect();
    if !stale.is_empty() {
        return Err(AmapError::StaleDefectList { adcodes: stale });
    }

    let mut unexpected: BTreeSet<usize> = report.invalid.iter().copied()
        .filter(|idx| !listed_idx.contains(idx))
        .collect();
    for &(i, j) in &report.overlaps {
        if !listed_idx.contains(&i) && !listed_idx.contains(&j) {
            unexpected.extend([i, j]);
        }
    }
    if !unexpected.is_empty() {
        return Err(AmapError::invalid(
            "district coverage",
            unexpected.iter().map(|&idx| layer.records[idx].adcode()),
        ));
    }

    if listed.is_empty() {
        return Ok(layer);
    }

    log::warn!(
        "district coverage has overlaps around {}, rebuilding them from their neighbors",
        listed.iter().map(|(a, _)| a.to_string()).collect::<Vec<_>>().join(", ")
    );

    for &(adcode, idx) in &listed {
        let coverage = Coverage::new(layer.geometries());
        let repaired = repair_member(&coverage, idx, precision).ok_or_else(|| AmapError::RepairFailed {
            adcode,
            reason: "neighbors leave no room for the unit".into(),
        })?;
        layer.records[idx].geometry = repaired;
    }

    let coverage = Coverage::new(layer.geometries());
    let report = coverage.check();
    if !report.is_valid() {
        let offenders = report.offenders();
        if let Some(&(adcode, _)) = listed.iter().find(|(_, idx)| offenders.contains(idx)) {
            return Err(AmapError::RepairFailed {
                adcode,
                reason: format!("coverage still invalid after repair ({} offending units)", offenders.len()),
            });
        }
        return Err(AmapError::invalid(
            "repaired district coverage",
            offenders.iter().map(|&idx| layer.records[idx].adcode()),
        ));
    }

    ensure_no_pockets(&coverage, &listed, precision)?;

    log::info!("repaired {} defective districts", listed.len());
    Ok(layer)
}

/// Fail when a repaired unit borders an area that nothing covers.
fn ensure_no_pockets(coverage: &Coverage, repaired: &[(Adcode, usize)], precision: u32) -> Result<()> {
    for &(adcode, idx) in repaired {
        let gaps = coverage.enclosed_gaps(idx, precision);
        if !gaps.0.is_empty() {
            return Err(AmapError::RepairFailed {
                adcode,
                reason: format!("repair leaves an uncovered pocket of {:.3e} square degrees", gaps.unsigned_area()),
            });
        }
    }
    Ok(())
}

/// Decode every raw record and produce the validated district layer.
pub fn build_district_layer(
    raws: &[RawDistrict],
    config: &PipelineConfig,
) -> Result<Layer<DistrictProperties>> {
    if raws.is_empty() {
        return Err(AmapError::MissingData("no district records to process".into()));
    }

    let records = raws.iter()
        .map(|raw| {
            let mut properties = raw.properties.clone();
            if properties.short_name.is_empty() {
                properties.short_name = shorten_district_name(&properties.district_name);
            }
            Ok(AdminRecord::new(properties, decode_district(raw, config.precision)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let layer = Layer::new(records);
    let duplicates: BTreeSet<Adcode> = layer.records.windows(2)
        .filter(|w| w[0].adcode() == w[1].adcode())
        .map(|w| w[0].properties.adcode())
        .collect();
    if !duplicates.is_empty() {
        return Err(AmapError::Decode(format!(
            "duplicate district adcodes: {}",
            duplicates.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
        )));
    }

    let layer = repair_layer(layer, &config.defective_adcodes, config.precision)?;
    log::info!("district level: {} units", layer.len());
    Ok(layer)
}
