use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::{Arc, Mutex};

use super::config::Config;
use super::constants::{ECAL_DEBUG_THRESHOLD, HCAL_DEBUG_THRESHOLD};
use super::error::ProcessorError;
use super::event::{read_event_file, Calorimeter, EventRecord};
use super::links::Layer1Links;

/// ECAL and HCAL hits are echoed above different energies
fn debug_threshold(detector: Calorimeter) -> u16 {
    match detector {
        Calorimeter::Ecal => ECAL_DEBUG_THRESHOLD,
        Calorimeter::Hcal => HCAL_DEBUG_THRESHOLD,
    }
}

/// Emulate the Layer-1 encoding for one event: build a fresh link grid,
/// ingest every hit, and append the hex dump to the output.
///
/// A hit whose coordinate does not resolve to a link address is logged and
/// skipped; the rest of the event is still processed.
fn process_event<W: Write>(
    record: &EventRecord,
    out: &mut W,
    debug: bool,
) -> Result<(), ProcessorError> {
    let mut links = Layer1Links::new(record.event, record.lumi, record.run);

    for hit in &record.hits {
        let result = match hit.detector {
            Calorimeter::Ecal => links.add_ecal_tower(hit.ieta, hit.iphi, hit.energy, hit.fine_grain),
            Calorimeter::Hcal => links.add_hcal_tower(hit.ieta, hit.iphi, hit.energy, hit.fine_grain),
        };
        if let Err(e) = result {
            log::warn!("Skipping tower hit in event {}: {}", record.event, e);
        } else if debug && hit.energy > debug_threshold(hit.detector) {
            log::info!(
                "Layer 1 {:?} et: {} ieta: {} iphi: {} fine grain: {}",
                hit.detector,
                hit.energy,
                hit.ieta,
                hit.iphi,
                hit.fine_grain
            );
        }
    }

    links.write_to_file(out)?;
    Ok(())
}

/// The main loop of the emulator.
///
/// Reads the event file named by the config and writes one link dump per
/// event to the output file. The progress fraction is shared with the UI
/// through the given mutex.
pub fn process(config: Config, progress: Arc<Mutex<f32>>) -> Result<(), ProcessorError> {
    let records = read_event_file(&config.event_path)?;
    log::info!(
        "Emulating {} events to {}",
        records.len(),
        config.output_path.to_string_lossy()
    );

    // The output handle lives exactly as long as this job
    let mut writer = BufWriter::new(File::create(&config.output_path)?);

    for (count, record) in records.iter().enumerate() {
        process_event(record, &mut writer, config.debug)?;
        match progress.lock() {
            Ok(mut fraction) => *fraction = (count + 1) as f32 / records.len() as f32,
            Err(e) => log::error!("Could not update progress: {}", e),
        }
    }

    writer.flush()?;
    Ok(())
}
