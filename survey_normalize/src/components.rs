// Land-cover component assembly.
//
// Two structural shapes exist in the wild. Newer form revisions store the
// breakdown as a repeated group (one element per sub-area); older ones store
// a single dominant group plus optional secondary and third vegetation
// groups. Shape detection is per record: a present, non-empty repeated group
// wins, else the flat shape, else no components at all.

use serde_json::Value as JSValue;

use crate::config::LandCoverComponent;
use crate::fields::{ArrayFields, CountryFields, CropRule, ExtraVegetation, FlatFields, VegPair};
use crate::percent::{parse_number, resolve_range_pair};
use crate::value::{first_string, get_array, get_string, key};

/// The site-level classification plus the per-area component breakdown.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct LandCover {
    pub level1_class: String,
    pub components: Vec<LandCoverComponent>,
}

pub(crate) fn extract_land_cover(data: &JSValue, table: &CountryFields) -> LandCover {
    if let Some(array) = table.array {
        if let Some(arr) = get_array(data, array.path) {
            if !arr.is_empty() {
                return from_repeated_groups(data, arr, array);
            }
        }
    }
    if let Some(flat) = table.flat {
        return from_flat_group(data, flat);
    }
    LandCover::default()
}

fn from_repeated_groups(data: &JSValue, arr: &[JSValue], t: &ArrayFields) -> LandCover {
    // The level-1 classification travels with the last repeated element.
    let level1_class = arr
        .last()
        .and_then(|elem| get_string(elem, t.level1_field))
        .or_else(|| first_string(data, t.site_class_fallback))
        .unwrap_or_default();
    let components = arr
        .iter()
        .map(|elem| repeated_group_component(elem, t))
        .collect();
    LandCover {
        level1_class,
        components,
    }
}

fn repeated_group_component(elem: &JSValue, t: &ArrayFields) -> LandCoverComponent {
    let landcover = get_string(elem, &key(t.elem_prefix, "landcover")).unwrap_or_default();
    let percentage = parse_number(get_string(elem, t.percentage_field).as_deref());

    let category = get_string(elem, &key(t.cultivated_prefix, "category_001"));
    let crop = resolve_crop(elem, t.cultivated_prefix, category.as_deref(), t.crops);

    let mut d = DetailList::new();
    d.push_str("landcover", &landcover);
    d.push(
        "veg_type",
        get_string(elem, &key(t.cultivated_prefix, "main_vegetation_type")),
    );
    d.push("artificiality", get_string(elem, t.artificiality_field));
    d.push("category", category);
    d.push_str("crop", &crop);
    d.push("season", get_string(elem, &key(t.cultivated_prefix, "season")));
    d.push(
        "on_season_type",
        get_string(elem, &key(t.cultivated_prefix, "on_season_type")),
    );
    d.push(
        "off_season_type",
        get_string(elem, &key(t.cultivated_prefix, "off_season_type")),
    );
    d.push(
        "frequency",
        get_string(elem, &key(t.cultivated_prefix, "frequency")),
    );
    d.push(
        "water",
        get_string(elem, &key(t.cultivated_prefix, "water_supply")),
    );
    d.push(
        "area_type",
        get_string(elem, &key(t.artificial_prefix, "Non_vegetated_area")),
    );
    d.push(
        "nonveg_off_season_type",
        get_string(elem, &key(t.artificial_prefix, "off_season_type")),
    );

    LandCoverComponent {
        classification: landcover,
        percentage,
        details: d.join(),
    }
}

fn from_flat_group(data: &JSValue, t: &FlatFields) -> LandCover {
    let level1_class = get_string(data, t.land_cover_types).unwrap_or_default();

    let mut components = Vec::new();
    if let Some(landcover) = get_string(data, t.landcover_field) {
        components.push(dominant_component(data, t, &landcover));
    }
    // Secondary and third vegetation are recorded even when the dominant
    // group was skipped.
    if let Some(extra) = t.secondary {
        if let Some(c) = extra_component(data, extra) {
            components.push(c);
        }
    }
    if let Some(extra) = t.third {
        if let Some(c) = extra_component(data, extra) {
            components.push(c);
        }
    }

    LandCover {
        level1_class,
        components,
    }
}

/// The broad kind of the dominant land-cover answer. The kind selects which
/// question group holds the component's detail fields; only vegetated areas
/// carry coverage percentages.
enum LandCoverKind {
    Vegetated,
    NonVegetated,
    Water,
    Other,
}

impl LandCoverKind {
    fn parse(s: &str) -> LandCoverKind {
        match s {
            "vegetated" => LandCoverKind::Vegetated,
            "non-vegetated" => LandCoverKind::NonVegetated,
            "water" => LandCoverKind::Water,
            _ => LandCoverKind::Other,
        }
    }
}

fn dominant_component(data: &JSValue, t: &FlatFields, landcover: &str) -> LandCoverComponent {
    let mut d = DetailList::new();
    d.push_str("landcover", landcover);
    let mut percentage = 0.0;

    match LandCoverKind::parse(landcover) {
        LandCoverKind::Vegetated => {
            let veg_type = get_string(data, t.veg_type_field);
            percentage = percentage_for_type(data, veg_type.as_deref(), t.veg_pairs);
            for f in t.veg_details {
                d.push(f.label, get_string(data, f.field));
            }
            let category = get_string(data, t.category_field);
            let crop = resolve_crop(data, "", category.as_deref(), t.crops);
            d.push_str("crop", &crop);
            for f in t.veg_details_tail {
                d.push(f.label, get_string(data, f.field));
            }
        }
        LandCoverKind::NonVegetated => {
            for f in t.nonveg_details {
                d.push(f.label, get_string(data, f.field));
            }
        }
        LandCoverKind::Water => {
            for f in t.water_details {
                d.push(f.label, get_string(data, f.field));
            }
        }
        LandCoverKind::Other => {}
    }

    LandCoverComponent {
        classification: landcover.to_string(),
        percentage,
        details: d.join(),
    }
}

fn extra_component(data: &JSValue, t: &ExtraVegetation) -> Option<LandCoverComponent> {
    if get_string(data, t.flag).as_deref() != Some("yes") {
        return None;
    }
    let veg_type = get_string(data, t.veg_type).unwrap_or_else(|| t.default_label.to_string());
    let percentage = percentage_for_type(data, Some(&veg_type), t.pairs);
    Some(LandCoverComponent {
        classification: "vegetated".to_string(),
        percentage,
        details: format!("{}: {}", t.detail_label, veg_type),
    })
}

/// Resolves the coverage percentage pair selected by the vegetation type.
/// No matching pair (including an unanswered type against typed pairs)
/// means no recorded coverage.
fn percentage_for_type(data: &JSValue, veg_type: Option<&str>, pairs: &[VegPair]) -> f64 {
    let matched = pairs.iter().find(|p| {
        p.types.is_empty() || veg_type.map_or(false, |t| p.types.contains(&t))
    });
    match matched {
        Some(p) => resolve_range_pair(
            get_string(data, p.min).as_deref(),
            get_string(data, p.max).as_deref(),
        ),
        None => 0.0,
    }
}

/// Looks up the crop answer selected by the category. A literal `other`
/// answer falls through to the free-text field when the rule has one.
/// `prefix` is joined onto rule fields; rules carrying full paths pass "".
fn resolve_crop(
    source: &JSValue,
    prefix: &str,
    category: Option<&str>,
    rules: &[CropRule],
) -> String {
    let category = match category {
        Some(c) => c,
        None => return String::new(),
    };
    let rule = match rules.iter().find(|r| r.category == category) {
        Some(r) => r,
        None => return String::new(),
    };
    let crop = get_string(source, &key(prefix, rule.field)).unwrap_or_default();
    if crop == "other" {
        if let Some(other_field) = rule.other_field {
            return get_string(source, &key(prefix, other_field))
                .unwrap_or_else(|| "other".to_string());
        }
    }
    crop
}

/// Ordered `label: value` accumulator; unanswered entries are skipped.
struct DetailList(Vec<String>);

impl DetailList {
    fn new() -> DetailList {
        DetailList(Vec::new())
    }

    fn push(&mut self, label: &str, value: Option<String>) {
        if let Some(v) = value {
            self.push_str(label, &v);
        }
    }

    fn push_str(&mut self, label: &str, value: &str) {
        if !value.is_empty() {
            self.0.push(format!("{}: {}", label, value));
        }
    }

    fn join(self) -> String {
        self.0.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Country;
    use crate::fields::country_fields;
    use serde_json::json;

    const ELEM: &str = "soilFER_collect/landcover_description/dominant_landcover";
    const CULT: &str =
        "soilFER_collect/landcover_description/dominant_landcover/group_mz57q81/Cultivated_vegatation";

    #[test]
    fn repeated_groups_keep_order_and_percentages() {
        let data = json!({
            "soilFER_collect/landcover_description": [
                {
                    (format!("{ELEM}/landcover")): "vegetated",
                    (format!("{ELEM}/Maximum")): "60",
                    (format!("{CULT}/main_vegetation_type")): "herbaceous",
                    (format!("{CULT}/category_001")): "basic_grains",
                    (format!("{CULT}/basic_grains")): "maize",
                    (format!("{CULT}/season")): "on_season",
                },
                {
                    (format!("{ELEM}/landcover")): "non-vegetated",
                    (format!("{ELEM}/Maximum")): "45",
                    (format!("{ELEM}/artificial_surfaces_group/Non_vegetated_area")): "bare_soil",
                    (format!("{ELEM}/land_cover_types")): "cropland",
                },
            ],
        });
        let lc = extract_land_cover(&data, country_fields(Country::Guatemala));
        assert_eq!(lc.level1_class, "cropland");
        assert_eq!(lc.components.len(), 2);
        assert_eq!(lc.components[0].classification, "vegetated");
        assert_eq!(lc.components[0].percentage, 60.0);
        assert_eq!(
            lc.components[0].details,
            "landcover: vegetated | veg_type: herbaceous | category: basic_grains | crop: maize | season: on_season"
        );
        assert_eq!(lc.components[1].percentage, 45.0);
        assert_eq!(
            lc.components[1].details,
            "landcover: non-vegetated | area_type: bare_soil"
        );
    }

    #[test]
    fn annual_crop_other_falls_through_to_free_text() {
        let data = json!({
            "soilFER_collect/landcover_description": [{
                (format!("{ELEM}/landcover")): "vegetated",
                (format!("{CULT}/category_001")): "crops_annual",
                (format!("{CULT}/crops_annual")): "other",
                (format!("{CULT}/other_crops_annual")): "amaranth",
            }],
        });
        let lc = extract_land_cover(&data, country_fields(Country::Guatemala));
        assert!(lc.components[0].details.contains("crop: amaranth"));
    }

    const TUN_GROUP: &str = "soilFER_collect/soil_description_sampling/erosion_status/landcover_description/dominant_landcover/cultivated_arable_land_group";
    const TUN_DOM: &str = "soilFER_collect/soil_description_sampling/erosion_status/landcover_description/dominant_landcover";

    #[test]
    fn legacy_shrub_spelling_still_selects_the_shrub_pair() {
        let data = json!({
            (format!("{TUN_DOM}/landcover")): "vegetated",
            (format!("{TUN_GROUP}/main_vegetation_type")): "schrubs",
            (format!("{TUN_GROUP}/Minimum_percentage_cover_shrub")): "25_50",
            (format!("{TUN_GROUP}/Maximum_percentage_cover_shrub")): "50_75",
        });
        let lc = extract_land_cover(&data, country_fields(Country::Tunisia));
        assert_eq!(lc.components[0].percentage, 75.0);
    }

    #[test]
    fn water_areas_have_no_percentage() {
        let data = json!({
            (format!("{TUN_DOM}/landcover")): "water",
            (format!("{TUN_DOM}/water_group/water_type")): "river",
        });
        let lc = extract_land_cover(&data, country_fields(Country::Tunisia));
        assert_eq!(lc.components.len(), 1);
        assert_eq!(lc.components[0].percentage, 0.0);
        assert_eq!(lc.components[0].details, "landcover: water | water_type: river");
    }

    #[test]
    fn secondary_and_third_are_flag_gated() {
        let data = json!({
            (format!("{TUN_DOM}/landcover")): "vegetated",
            (format!("{TUN_GROUP}/main_vegetation_type")): "trees",
            (format!("{TUN_GROUP}/Maximum_percentage_cover_tree")): "50_75",
            (format!("{TUN_GROUP}/any_secondary_veg")): "yes",
            (format!("{TUN_GROUP}/secondary_vegetation_type")): "herbaceous",
            (format!("{TUN_GROUP}/max_perc_cover_secondary_herb")): "10_25",
            (format!("{TUN_GROUP}/any_third_veg")): "no",
        });
        let lc = extract_land_cover(&data, country_fields(Country::Tunisia));
        assert_eq!(lc.components.len(), 2);
        assert_eq!(lc.components[1].classification, "vegetated");
        assert_eq!(lc.components[1].percentage, 25.0);
        assert_eq!(lc.components[1].details, "secondary veg_type: herbaceous");
    }

    #[test]
    fn third_vegetation_defaults_its_label_and_has_no_pair() {
        let data = json!({
            (format!("{TUN_GROUP}/any_third_veg")): "yes",
        });
        let lc = extract_land_cover(&data, country_fields(Country::Tunisia));
        assert_eq!(lc.components.len(), 1);
        assert_eq!(lc.components[0].classification, "vegetated");
        // "Third" matches no typed percentage pair.
        assert_eq!(lc.components[0].percentage, 0.0);
        assert_eq!(lc.components[0].details, "third veg_type: Third");
    }

    #[test]
    fn missing_everything_yields_no_components() {
        let data = json!({});
        let lc = extract_land_cover(&data, country_fields(Country::Honduras));
        assert_eq!(lc, LandCover::default());
    }
}
