//! Plain-text rendering of assessments, wagon sheets and history

use std::io::Write;

use railguard_core::prelude::*;
use railguard_core::si;
use railguard_core::wagon::WagonNumberInfo;

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

fn write_trip<W: Write>(out: &mut W, trip: &TripInfo) -> anyhow::Result<()> {
    writeln!(
        out,
        "Train {} | {} -> {} | {} {}",
        or_dash(&trip.train_number),
        or_dash(&trip.origin),
        or_dash(&trip.destination),
        or_dash(&trip.departure_date),
        or_dash(&trip.departure_time)
    )?;
    writeln!(
        out,
        "Driver: {} | Train boss: {}",
        or_dash(&trip.driver_name),
        or_dash(&trip.train_boss_name)
    )?;
    Ok(())
}

fn write_wagon_list<W: Write>(out: &mut W, wagons: &[SelectedWagon]) -> anyhow::Result<()> {
    for (idx, wagon) in wagons.iter().enumerate() {
        let brakes = match (
            wagon.main_brake_healthy(),
            wagon.hand_brake_healthy(),
            wagon.brake_handle_healthy(),
        ) {
            (true, true, true) => "ok".to_string(),
            (main, hand, handle) => {
                let mut faults = vec![];
                if !main {
                    faults.push("main");
                }
                if !hand {
                    faults.push("hand");
                }
                if !handle {
                    faults.push("handle");
                }
                format!("faulty: {}", faults.join(", "))
            }
        };
        writeln!(
            out,
            "{:>3}. #{} {:<24} {:?} {:>6.1} t  brakes {}  DG {}",
            idx + 1,
            wagon.number(),
            wagon.spec.wagon_type,
            wagon.load_status(),
            wagon.effective_weight().get::<si::megagram>(),
            brakes,
            wagon.dangerous_goods_code().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn write_assessment<W: Write>(
    out: &mut W,
    composition: &Composition,
    assessment: &Assessment,
) -> anyhow::Result<()> {
    write_trip(out, &composition.trip)?;
    writeln!(
        out,
        "Slope: {} per mille | {} locomotive(s), {} wagon(s)",
        composition.slope,
        composition.locomotives.len(),
        composition.wagons.len()
    )?;
    write_wagon_list(out, &composition.wagons)?;
    writeln!(out, "Validation: {}", assessment.validation_message)?;
    if let (Some(result), Some(train)) = (&assessment.result, &assessment.train) {
        writeln!(
            out,
            "Weight: {:.1} t | Brake weight: {:.1} t | Length: {:.1} m | Axles: {}",
            train.total_weight.get::<si::megagram>(),
            train.total_brake_weight.get::<si::megagram>(),
            train.total_length.get::<si::meter>(),
            train.axle_count
        )?;
        writeln!(
            out,
            "Brake percentage: {}% | Max speed: {} km/h",
            result.brake_percentage, result.max_speed
        )?;
    }
    writeln!(
        out,
        "{}: {}",
        if assessment.departure_allowed() {
            "DEPARTURE ALLOWED"
        } else {
            "DEPARTURE DENIED"
        },
        assessment.message()
    )?;
    Ok(())
}

pub fn write_wagon<W: Write>(
    out: &mut W,
    info: &WagonNumberInfo,
    spec: &WagonSpec,
) -> anyhow::Result<()> {
    writeln!(out, "Decoded: {info}")?;
    write!(out, "{spec}")?;
    Ok(())
}

pub fn write_history_list<W: Write>(out: &mut W, items: &[HistoryItem]) -> anyhow::Result<()> {
    if items.is_empty() {
        writeln!(out, "No saved trains")?;
        return Ok(());
    }
    for item in items {
        writeln!(
            out,
            "#{:<4} {}  train {:<8} driver {:<16} {:>7.1} t  {:>3} km/h",
            item.id,
            item.created_at.format("%Y-%m-%d %H:%M"),
            or_dash(&item.trip.train_number),
            or_dash(&item.trip.driver_name),
            item.total_weight.get::<si::megagram>(),
            item.max_speed
        )?;
    }
    Ok(())
}

pub fn write_history_item<W: Write>(out: &mut W, item: &HistoryItem) -> anyhow::Result<()> {
    writeln!(
        out,
        "Saved train #{} at {}",
        item.id,
        item.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    write_trip(out, &item.trip)?;
    writeln!(
        out,
        "Slope: {} per mille | Weight: {:.1} t | Max speed: {} km/h",
        item.slope,
        item.total_weight.get::<si::megagram>(),
        item.max_speed
    )?;
    for loco in &item.locomotives {
        writeln!(
            out,
            "  loco {} #{} {:.1} t {}",
            loco.model_id,
            loco.number,
            loco.weight().get::<si::megagram>(),
            if loco.is_hot() { "hot" } else { "dead" }
        )?;
    }
    write_wagon_list(out, &item.wagons)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railguard_core::uc;

    fn render<F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_denied_assessment() {
        let mut composition = Composition::default();
        composition.trip.train_number = "4711".into();
        let assessment = Assessment {
            validation_passed: false,
            validation_message: "Conflict: x".into(),
            result: None,
            train: None,
        };
        let text = render(|out| write_assessment(out, &composition, &assessment));
        assert!(text.contains("Train 4711 | - -> -"));
        assert!(text.contains("DEPARTURE DENIED: Conflict: x"));
        assert!(!text.contains("Brake percentage"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(render(|out| write_history_list(out, &[])), "No saved trains\n");
    }

    #[test]
    fn test_faulty_brakes_listed() {
        let mut wagon = SelectedWagon::new(WagonSpec {
            number: 147001,
            wagon_type: "Covered (Gas)".into(),
            weight_loaded: 90.0 * uc::T,
            ..Default::default()
        });
        wagon.set_main_brake_healthy(false);
        wagon.set_brake_handle_healthy(false);
        let text = render(|out| write_wagon_list(out, &[wagon]));
        assert!(text.contains("faulty: main, handle"));
        assert!(text.contains("90.0 t"));
    }
}
