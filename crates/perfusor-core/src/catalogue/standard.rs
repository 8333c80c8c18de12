//! Built-in perfusor standard 13H3 (09/2019), concentrations per house standard.

use std::sync::LazyLock;

use super::{Catalogue, CatalogueEntry};
use crate::models::{AmountUnit, DoseUnit, Preparation};

static STANDARD: LazyLock<Catalogue> = LazyLock::new(|| {
    // Checked by tests; an invalid table degrades to an empty catalogue.
    Catalogue::new(standard_entries()).unwrap_or_default()
});

/// The process-wide standard catalogue.
pub fn standard_catalogue() -> &'static Catalogue {
    &STANDARD
}

/// Entries of the standard table, in sheet order.
pub fn standard_entries() -> Vec<CatalogueEntry> {
    use AmountUnit::{InternationalUnit as IU, Microgram as Mcg, Milligram as Mg};
    use DoseUnit::*;

    let prep = |amount: f64, unit: AmountUnit, dose_unit: DoseUnit, start: Option<f64>, max: Option<f64>, note: &str| {
        Preparation::new(amount, unit, 50.0, dose_unit)
            .with_reference(start, max)
            .with_annotation(note)
    };

    vec![
        CatalogueEntry::new(
            "Noradrenalin (Arterenol)",
            prep(10.0, Mg, MicrogramPerKgPerMinute, Some(0.10), Some(0.50),
                "Usually 10 mg/50 ml NaCl; output in γ (= µg/kg/min)."),
        ),
        CatalogueEntry::new(
            "Adrenalin (Suprarenin)",
            prep(10.0, Mg, MicrogramPerKgPerMinute, Some(0.10), Some(0.50),
                "Usually 10 mg/50 ml NaCl; output in γ (= µg/kg/min)."),
        ),
        CatalogueEntry::new(
            "Dobutamin (Dobutrex)",
            prep(500.0, Mg, MicrogramPerKgPerMinute, Some(3.0), None,
                "250 mg/50 ml is common in some hospitals; 500 mg/50 ml per sheet."),
        ),
        CatalogueEntry::new(
            "Remifentanil (Ultiva) 5 mg/50 ml",
            prep(5.0, Mg, MicrogramPerKgPerMinute, Some(0.05), Some(0.20),
                "Never as bolus; very short half-life."),
        ),
        CatalogueEntry::new(
            "Remifentanil (Ultiva) 10 mg/50 ml",
            prep(10.0, Mg, MicrogramPerKgPerMinute, Some(0.05), Some(0.20),
                "Alternative concentration."),
        ),
        CatalogueEntry::new(
            "Propofol",
            prep(1000.0, Mg, MilligramPerKgPerHour, Some(1.0), Some(4.0),
                "Mind the wake-up call."),
        ),
        CatalogueEntry::new(
            "Esketamin (Ketanest S)",
            prep(1250.0, Mg, MilligramPerKgPerHour, Some(1.0), Some(3.0),
                "CAVE not as monotherapy (per sheet)."),
        ),
        CatalogueEntry::new(
            "Clonidin (Catapresan)",
            prep(1.5, Mg, MicrogramPerHour, Some(30.0), Some(120.0),
                "Output in µg/h (weight-independent)."),
        ),
        CatalogueEntry::new(
            "Dexmedetomidin (Dexdor)",
            prep(1000.0, Mcg, MicrogramPerKgPerHour, Some(0.7), Some(1.4),
                "CAVE AV block (per sheet)."),
        ),
        CatalogueEntry::new(
            "Midazolam (Dormicum)",
            prep(250.0, Mg, MicrogramPerKgPerHour, Some(100.0), None,
                "High dose >300 µg/kg/h (per sheet)."),
        ),
        CatalogueEntry::new(
            "Urapidil (Ebrantil)",
            prep(250.0, Mg, MilligramPerHour, Some(10.0), Some(50.0),
                "Output in mg/h (weight-independent)."),
        ),
        CatalogueEntry::new(
            "Heparin",
            prep(10_000.0, IU, InternationalUnitPerHour, Some(350.0), None,
                "Prophylaxis approx. 300–400 IU/h; therapeutic per aPTT (per sheet)."),
        ),
        CatalogueEntry::new(
            "Isoprenalin (Isuprel)",
            prep(1.0, Mg, MicrogramPerKgPerMinute, Some(0.01), Some(0.03),
                "Indication e.g. AV block/SSS (per sheet)."),
        ),
        CatalogueEntry::new(
            "Landiolol (Rapibloc)",
            prep(300.0, Mg, MicrogramPerKgPerMinute, Some(2.5), Some(20.0),
                "Increase stepwise every 10 min (per sheet)."),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseUnit;
    use crate::units::concentration;

    #[test]
    fn test_standard_table_is_valid() {
        let catalogue = Catalogue::new(standard_entries()).unwrap();
        assert_eq!(catalogue.len(), 14);
        assert_eq!(standard_catalogue().len(), 14);
    }

    #[test]
    fn test_standard_concentrations() {
        let catalogue = standard_catalogue();

        let cases = [
            ("Noradrenalin (Arterenol)", 200.0, BaseUnit::Microgram),
            ("Dobutamin (Dobutrex)", 10_000.0, BaseUnit::Microgram),
            ("Propofol", 20_000.0, BaseUnit::Microgram),
            ("Clonidin (Catapresan)", 30.0, BaseUnit::Microgram),
            ("Dexmedetomidin (Dexdor)", 20.0, BaseUnit::Microgram),
            ("Heparin", 200.0, BaseUnit::InternationalUnit),
            ("Isoprenalin (Isuprel)", 20.0, BaseUnit::Microgram),
        ];

        for (name, expected, unit) in cases {
            let conc = concentration(catalogue.get(name).unwrap());
            assert!((conc.value - expected).abs() < 1e-9, "{name}: {}", conc.value);
            assert_eq!(conc.unit, Some(unit), "{name}");
        }
    }

    #[test]
    fn test_every_standard_entry_is_continuous() {
        for entry in standard_catalogue().entries() {
            assert!(entry.preparation.dose_unit.is_continuous(), "{}", entry.name);
            assert_eq!(entry.preparation.volume_ml, Some(50.0), "{}", entry.name);
        }
    }
}
