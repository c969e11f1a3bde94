//! Spatial filter parameter assembly.
//!
//! A spatial filter option names a location field and a point; assembly
//! turns it into the appropriate Solr filter query, absorbs any numeric
//! range filter already present on the same field into the effective radius,
//! rewrites sorts on the field into geodistance sorts, and converts facet
//! ranges into discrete distance-bucket facet queries.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::params::assembler::ParamsAssembler;

/// Prefix of the single-valued location sort marker fields. Direct sorting
/// on location fields is unsupported; sort keys with this prefix are
/// stripped unless a spatial option rewrote them into geodistance sorts.
pub const LOCATION_SORT_PREFIX: &str = "locs_";

/// Upper limit on the number of distance buckets a facet range may expand
/// into.
const MAX_DISTANCE_BUCKETS: usize = 10_000;

/// The filter shape used when only an upper radius bound is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialMethod {
    /// Exact great-circle distance filter.
    #[default]
    Geofilt,
    /// Cheaper bounding-box approximation.
    Bbox,
}

/// A single spatial filter option.
///
/// `field`, `lat` and `lon` are required; an entry missing any of them is
/// malformed and skipped with a warning rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialOptions {
    /// The logical location field to filter on.
    #[serde(default)]
    pub field: Option<String>,
    /// Latitude of the filter center, in degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude of the filter center, in degrees.
    #[serde(default)]
    pub lon: Option<f64>,
    /// Maximum distance from the center, in kilometers.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Minimum distance from the center, in kilometers.
    #[serde(default)]
    pub min_radius: Option<f64>,
    /// Filter shape when no lower bound applies.
    #[serde(default)]
    pub method: SpatialMethod,
}

impl ParamsAssembler {
    /// Populate spatial filter parameters.
    ///
    /// Must run before [`apply_sorts`](ParamsAssembler::apply_sorts) when
    /// both touch the same field: sort rewriting operates on the pending
    /// sort entries and marks them resolved. Malformed entries are skipped
    /// per-entry with a warning; the remaining entries are still processed.
    pub fn apply_spatial(&mut self, options: &[SpatialOptions]) {
        for (index, option) in options.iter().enumerate() {
            if let Err(reason) = self.apply_spatial_entry(option) {
                self.warn(format!(
                    "Skipping malformed spatial filter option {index}: {reason}."
                ));
            }
        }

        // Plain sort keys on location fields that no spatial option rewrote
        // cannot be sorted on and are dropped.
        let fields = &self.fields;
        self.pending_sorts.retain(|sort| {
            if sort.resolved {
                return true;
            }
            let on_location = sort.field.starts_with(LOCATION_SORT_PREFIX)
                || fields.get(&sort.field).is_some_and(|info| {
                    info.location || info.solr_name.starts_with(LOCATION_SORT_PREFIX)
                });
            !on_location
        });
    }

    fn apply_spatial_entry(&mut self, option: &SpatialOptions) -> Result<(), String> {
        let field = option
            .field
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or("missing field")?;
        let lat = option.lat.ok_or("missing latitude")?;
        let lon = option.lon.ok_or("missing longitude")?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("invalid latitude {lat}"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(format!("invalid longitude {lon}"));
        }
        let info = self
            .fields
            .get(field)
            .ok_or_else(|| format!("unknown field '{field}'"))?
            .clone();
        let solr_field = info.solr_name;
        let distance = format!("geodist({solr_field},{lat},{lon})");

        let mut lower = option.min_radius;
        let mut upper = option.radius;

        // A numeric range filter already present on the field declares
        // distance bounds of its own; absorb it and tighten to the
        // intersection.
        let range_re = Regex::new(&format!(
            r"^\s*{}:\s*\[(\S+)\s+TO\s+(\S+)\]\s*$",
            regex::escape(&solr_field)
        ))
        .map_err(|e| format!("field name not expressible in a filter pattern: {e}"))?;
        let absorbed = self
            .params
            .remove_matching(|key, value| key == "fq" && range_re.is_match(value));
        for (_, value) in &absorbed {
            if let Some(caps) = range_re.captures(value) {
                if let Ok(bound) = caps[1].parse::<f64>() {
                    lower = Some(lower.map_or(bound, |current| current.max(bound)));
                }
                if let Ok(bound) = caps[2].parse::<f64>() {
                    upper = Some(upper.map_or(bound, |current| current.min(bound)));
                }
            }
        }

        match (lower, upper) {
            (Some(l), Some(u)) => {
                self.params
                    .add("fq", format!("{{!frange l={l} u={u}}}{distance}"));
            }
            (Some(l), None) => {
                self.params.add("fq", format!("{{!frange l={l}}}{distance}"));
            }
            (None, Some(u)) => {
                let local_params = match option.method {
                    SpatialMethod::Geofilt => "!geofilt",
                    SpatialMethod::Bbox => "!bbox",
                };
                self.params.add(
                    "fq",
                    format!("{{{local_params} sfield={solr_field} pt={lat},{lon} d={u}}}"),
                );
            }
            // No bounds at all: nothing to filter, but sort and facet
            // rewriting below still apply.
            (None, None) => {}
        }

        for sort in &mut self.pending_sorts {
            if !sort.resolved && sort.field == field {
                sort.field = distance.clone();
                sort.resolved = true;
            }
        }

        self.rewrite_facet_ranges(&solr_field, &distance);
        Ok(())
    }

    /// Replace a `facet.range` on the spatial field with discrete
    /// distance-bucket `facet.query` entries, since range faceting cannot
    /// run over a computed geodistance.
    fn rewrite_facet_ranges(&mut self, solr_field: &str, distance: &str) {
        let removed = self
            .params
            .remove_matching(|key, value| key == "facet.range" && value == solr_field);
        if removed.is_empty() {
            return;
        }

        let start = self.take_range_param(solr_field, "start");
        let end = self.take_range_param(solr_field, "end");
        let gap = self.take_range_param(solr_field, "gap");
        let (Some(start), Some(end), Some(gap)) = (start, end, gap) else {
            self.warn(format!(
                "Dropping facet range on spatial field '{solr_field}': \
                 start, end and gap must all be numeric."
            ));
            return;
        };
        if gap <= 0.0 || !gap.is_finite() || !start.is_finite() || !end.is_finite() {
            self.warn(format!(
                "Dropping facet range on spatial field '{solr_field}': \
                 bounds must be finite and the gap positive."
            ));
            return;
        }

        // Iterating by bucket index keeps the expansion terminating even
        // when `start + gap` rounds back to `start` in f64.
        let bucket_count = ((end - start) / gap).ceil();
        if bucket_count > MAX_DISTANCE_BUCKETS as f64 {
            self.warn(format!(
                "Dropping facet range on spatial field '{solr_field}': \
                 the gap expands to more than {MAX_DISTANCE_BUCKETS} distance buckets."
            ));
            return;
        }
        if bucket_count <= 0.0 {
            return;
        }

        for index in 0..bucket_count as usize {
            let bucket_start = start + index as f64 * gap;
            let bucket_end = (start + (index + 1) as f64 * gap).min(end);
            if bucket_end <= bucket_start {
                continue;
            }
            self.params.add(
                "facet.query",
                format!("{{!frange l={bucket_start} u={bucket_end}}}{distance}"),
            );
        }
    }

    fn take_range_param(&mut self, solr_field: &str, suffix: &str) -> Option<f64> {
        let per_field = format!("f.{solr_field}.facet.range.{suffix}");
        let value = self
            .params
            .take_first(&per_field)
            .or_else(|| {
                self.params
                    .get(&format!("facet.range.{suffix}"))
                    .map(str::to_string)
            })?;
        value.trim().parse().ok()
    }
}
