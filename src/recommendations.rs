//! Static mitigation advice keyed by factor combination.
//!
//! Lookups match on `(p, q, r, result)`. A `result` that disagrees with
//! `p ∧ (q ∨ r)` has no row and yields [`AppError::LookupMiss`].

use serde::Serialize;

use crate::errors::AppError;
use crate::risk::{DisasterType, RiskAssessment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub icon: &'static str,
    pub color: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

const FLOOD_SAFE: Recommendation = Recommendation {
    icon: "fa-check-circle",
    color: "text-green-600",
    title: "✅ Tidak Ada Risiko Banjir",
    text: "Kondisi saat ini aman dari risiko banjir.\nTetap lakukan pemantauan rutin.",
};

const FLOOD_PREEMPTIVE: Recommendation = Recommendation {
    icon: "fa-exclamation",
    color: "text-orange-600",
    title: "⚠️ SIAGA ANTISIPASI",
    text: "Kombinasi lahan rusak dan drainase buruk sangat berisiko.\n\
           Rekomendasi: Meskipun belum hujan, segera lakukan perbaikan infrastruktur\n\
           dan siapkan jalur evakuasi.",
};

const FLOOD_MAXIMUM: Recommendation = Recommendation {
    icon: "fa-exclamation-triangle",
    color: "text-red-700",
    title: "🔴 BAHAYA BANJIR MAKSIMAL",
    text: "Semua faktor risiko aktif!\n\
           TINDAKAN:\n\
           - Evakuasi segera ke tempat tinggi\n\
           - Matikan listrik dan gas\n\
           - Bawa dokumen penting\n\
           - Ikuti instruksi petugas",
};

const FLOOD_LAND: Recommendation = Recommendation {
    icon: "fa-tree",
    color: "text-orange-600",
    title: "⚠️ RISIKO BANJIR - FAKTOR LAHAN",
    text: "Curah hujan tinggi dengan kerusakan lahan.\n\
           TINDAKAN:\n\
           - Siaga evakuasi\n\
           - Pantau daerah deforestasi\n\
           - Hindari area rawan longsor",
};

const FLOOD_DRAINAGE: Recommendation = Recommendation {
    icon: "fa-water",
    color: "text-orange-600",
    title: "⚠️ RISIKO BANJIR - FAKTOR DRAINASE",
    text: "Curah hujan tinggi dengan drainase buruk.\n\
           TINDAKAN:\n\
           - Siaga evakuasi\n\
           - Pantau ketinggian sungai\n\
           - Siapkan jalur evakuasi",
};

const QUAKE_SAFE: Recommendation = Recommendation {
    icon: "fa-check-circle",
    color: "text-green-600",
    title: "✅ Tidak Ada Risiko Gempa",
    text: "Tidak ada aktivitas seismik signifikan.\nTetap siaga dan waspada.",
};

const QUAKE_MAXIMUM: Recommendation = Recommendation {
    icon: "fa-house-crack",
    color: "text-red-700",
    title: "🔴 BAHAYA GEMPA MAKSIMAL",
    text: "Aktivitas seismik tinggi dengan bangunan rentan.\n\
           TINDAKAN:\n\
           - Keluar dari bangunan\n\
           - Hindari area longsor\n\
           - Ke tempat terbuka\n\
           - Siaga tsunami jika dekat pantai",
};

const QUAKE_BUILDING: Recommendation = Recommendation {
    icon: "fa-building",
    color: "text-orange-600",
    title: "⚠️ RISIKO KERUSAKAN BANGUNAN",
    text: "Gempa dengan bangunan berkualitas buruk.\n\
           TINDAKAN:\n\
           - Evakuasi dari bangunan\n\
           - Hindari struktur tinggi\n\
           - Ke area terbuka",
};

const QUAKE_LANDSLIDE: Recommendation = Recommendation {
    icon: "fa-mountain",
    color: "text-orange-600",
    title: "⚠️ RISIKO TANAH LONGSOR",
    text: "Gempa di area rawan longsor.\n\
           TINDAKAN:\n\
           - Jauhi lereng bukit\n\
           - Hindari jurang\n\
           - Evakuasi ke dataran",
};

// Classic single-hazard table: every row has its own advice.
const CLASSIC_IDEAL: Recommendation = Recommendation {
    icon: "fa-sun",
    color: "text-green-600",
    title: "✅ KONDISI IDEAL",
    text: "Tidak ada hujan, hutan masih terjaga, dan sungai dalam kondisi baik.\n\
           Rekomendasi: Lakukan pemantauan rutin dan jaga kelestarian lingkungan.",
};

const CLASSIC_DRAINAGE_REPAIR: Recommendation = Recommendation {
    icon: "fa-tools",
    color: "text-yellow-600",
    title: "⚠️ PERBAIKAN DRAINASE",
    text: "Sungai dangkal/sempit memerlukan normalisasi.\n\
           Rekomendasi: Lakukan pengerukan sedimen dan pelebaran aliran sungai\n\
           untuk antisipasi hujan mendatang.",
};

const CLASSIC_REFORESTATION: Recommendation = Recommendation {
    icon: "fa-seedling",
    color: "text-yellow-600",
    title: "⚠️ REBOISASI LAHAN",
    text: "Alih fungsi lahan sawit mengurangi daya serap air.\n\
           Rekomendasi: Implementasikan program reboisasi dan sistem agroforestri\n\
           untuk mencegah run-off tinggi.",
};

const CLASSIC_CONTROLLED_RAIN: Recommendation = Recommendation {
    icon: "fa-umbrella",
    color: "text-blue-600",
    title: "✅ HUJAN AMAN TERKENDALI",
    text: "Hujan deras, namun hutan lebat menyerap air dengan baik dan sungai lancar.\n\
           Rekomendasi: Kondisi aman, tetap pantau intensitas hujan dan\n\
           ketinggian air sungai.",
};

const CLASSIC_DRAINAGE_WARNING: Recommendation = Recommendation {
    icon: "fa-water",
    color: "text-red-600",
    title: "🚨 PERINGATAN BANJIR - DRAINASE BURUK",
    text: "Hujan deras dengan sungai dangkal/sempit menyebabkan luapan air.\n\
           TINDAKAN SEGERA:\n\
           - Evakuasi warga di bantaran sungai\n\
           - Tutup akses jalan rendah\n\
           - Aktifkan posko bencana",
};

const CLASSIC_RUNOFF_WARNING: Recommendation = Recommendation {
    icon: "fa-mountain",
    color: "text-red-600",
    title: "🚨 PERINGATAN BANJIR - RUN-OFF TINGGI",
    text: "Hujan deras pada lahan sawit memicu run-off ekstrem.\n\
           TINDAKAN SEGERA:\n\
           - Evakuasi warga di lereng bukit dan daerah aliran sungai\n\
           - Waspadai banjir bandang dan tanah longsor",
};

const CLASSIC_EMERGENCY: Recommendation = Recommendation {
    icon: "fa-exclamation-triangle",
    color: "text-red-700",
    title: "🔴 BAHAYA MAKSIMAL - EVAKUASI DARURAT",
    text: "KONDISI KRITIS! Kombinasi hujan deras, lahan rusak, dan drainase buruk.\n\
           TINDAKAN DARURAT:\n\
           - Evakuasi massal ke tempat tinggi\n\
           - Aktifkan semua posko\n\
           - Koordinasi dengan BNPB\n\
           - Siapkan bantuan logistik",
};

fn miss(table: &str, p: bool, q: bool, r: bool, result: bool) -> AppError {
    AppError::LookupMiss(format!(
        "{} combination ({}, {}, {}) with result {}",
        table, p, q, r, result
    ))
}

/// Enhanced flood advice. Inactive rows collapse to one "safe" record,
/// except land damage plus bad drainage without rain, which is a
/// pre-emptive alert.
pub fn flood(p: bool, q: bool, r: bool, result: bool) -> Result<Recommendation, AppError> {
    match (p, q, r, result) {
        (false, true, true, false) => Ok(FLOOD_PREEMPTIVE),
        (false, _, _, false) | (true, false, false, false) => Ok(FLOOD_SAFE),
        (true, true, true, true) => Ok(FLOOD_MAXIMUM),
        (true, true, false, true) => Ok(FLOOD_LAND),
        (true, false, true, true) => Ok(FLOOD_DRAINAGE),
        _ => Err(miss("flood", p, q, r, result)),
    }
}

/// Earthquake advice. Every inactive row shares the "safe" record.
pub fn earthquake(e: bool, b: bool, l: bool, result: bool) -> Result<Recommendation, AppError> {
    match (e, b, l, result) {
        (false, _, _, false) | (true, false, false, false) => Ok(QUAKE_SAFE),
        (true, true, true, true) => Ok(QUAKE_MAXIMUM),
        (true, true, false, true) => Ok(QUAKE_BUILDING),
        (true, false, true, true) => Ok(QUAKE_LANDSLIDE),
        _ => Err(miss("earthquake", e, b, l, result)),
    }
}

pub fn classic_flood(p: bool, q: bool, r: bool, result: bool) -> Result<Recommendation, AppError> {
    match (p, q, r, result) {
        (false, false, false, false) => Ok(CLASSIC_IDEAL),
        (false, false, true, false) => Ok(CLASSIC_DRAINAGE_REPAIR),
        (false, true, false, false) => Ok(CLASSIC_REFORESTATION),
        (false, true, true, false) => Ok(FLOOD_PREEMPTIVE),
        (true, false, false, false) => Ok(CLASSIC_CONTROLLED_RAIN),
        (true, false, true, true) => Ok(CLASSIC_DRAINAGE_WARNING),
        (true, true, false, true) => Ok(CLASSIC_RUNOFF_WARNING),
        (true, true, true, true) => Ok(CLASSIC_EMERGENCY),
        _ => Err(miss("classic flood", p, q, r, result)),
    }
}

/// Multi-hazard advice for an evaluated row: the enhanced flood table or
/// the earthquake table, by hazard.
pub fn recommend(assessment: &RiskAssessment) -> Result<Recommendation, AppError> {
    let RiskAssessment {
        disaster,
        factors,
        result,
        ..
    } = *assessment;
    match disaster {
        DisasterType::Flood => flood(factors.p, factors.q, factors.r, result),
        DisasterType::Earthquake => earthquake(factors.p, factors.q, factors.r, result),
    }
}

/// Per-row advice served by `/api/calculate`. Only flood rows have entries.
pub fn recommend_classic(assessment: &RiskAssessment) -> Result<Recommendation, AppError> {
    let RiskAssessment {
        disaster,
        factors,
        result,
        ..
    } = *assessment;
    match disaster {
        DisasterType::Flood => classic_flood(factors.p, factors.q, factors.r, result),
        DisasterType::Earthquake => Err(miss(
            "classic earthquake",
            factors.p,
            factors.q,
            factors.r,
            result,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{evaluate, generate_table, RiskAssessment, RiskFactors};

    #[test]
    fn test_every_row_has_advice_in_every_table() {
        let rows = generate_table(DisasterType::Flood)
            .into_iter()
            .chain(generate_table(DisasterType::Earthquake));
        for row in rows {
            let rec = recommend(&row).expect("row must be covered");
            assert!(!rec.title.is_empty());
            assert!(!rec.title.contains("Unknown"));
            assert!(!rec.text.is_empty());
        }
        for row in generate_table(DisasterType::Flood) {
            assert!(recommend_classic(&row).is_ok());
        }
    }

    #[test]
    fn test_recommend_dispatches_on_hazard() {
        let quake = RiskAssessment::assess(DisasterType::Earthquake, RiskFactors::from_bits(0b011));
        let flood_row = RiskAssessment::assess(DisasterType::Flood, RiskFactors::from_bits(0b011));

        // same bits, different tables: only flood has the pre-emptive tier
        assert_eq!(recommend(&quake).unwrap(), QUAKE_SAFE);
        assert_eq!(recommend(&flood_row).unwrap(), FLOOD_PREEMPTIVE);

        assert!(matches!(
            recommend_classic(&quake),
            Err(AppError::LookupMiss(_))
        ));
    }

    #[test]
    fn test_inconsistent_result_is_a_lookup_miss() {
        // rain alone never triggers a flood
        assert!(matches!(
            flood(true, false, false, true),
            Err(AppError::LookupMiss(_))
        ));
        // no seismic activity means no earthquake
        assert!(matches!(
            earthquake(false, true, true, true),
            Err(AppError::LookupMiss(_))
        ));
        assert!(matches!(
            classic_flood(true, true, true, false),
            Err(AppError::LookupMiss(_))
        ));
    }

    #[test]
    fn test_flood_preemptive_alert_is_distinct() {
        let (_, result) = evaluate(false, true, true);
        assert!(!result);
        let preemptive = flood(false, true, true, result).unwrap();
        let safe = flood(false, false, false, false).unwrap();
        assert_ne!(preemptive, safe);
        assert!(preemptive.title.contains("SIAGA"));

        // earthquake has no such tier
        assert_eq!(
            earthquake(false, true, true, false).unwrap(),
            earthquake(false, false, false, false).unwrap()
        );
    }

    #[test]
    fn test_inactive_flood_rows_share_safe_record() {
        for bits in [0b000, 0b001, 0b010, 0b100] {
            let f = RiskFactors::from_bits(bits);
            assert_eq!(flood(f.p, f.q, f.r, false).unwrap(), FLOOD_SAFE);
        }
    }

    #[test]
    fn test_maximum_titles() {
        assert!(flood(true, true, true, true).unwrap().title.contains("MAKSIMAL"));
        assert!(earthquake(true, true, true, true)
            .unwrap()
            .title
            .contains("MAKSIMAL"));
        assert!(classic_flood(true, true, true, true)
            .unwrap()
            .title
            .contains("MAKSIMAL"));
    }

    #[test]
    fn test_classic_table_is_fully_distinct() {
        let titles: std::collections::HashSet<&str> = generate_table(DisasterType::Flood)
            .iter()
            .map(|row| recommend_classic(row).unwrap().title)
            .collect();
        assert_eq!(titles.len(), 8);
    }
}
