use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

use sancai_naming::{
    analyze_birth_chart, format_report, save_report, to_json, BirthDate, CharacterDictionary,
    Element, Gender, NameRequest, NamingEngine, NarrativeComposer, NumberLuckTable,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.len() < 2 || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return Ok(());
    }

    let surname = args[0].clone();
    let gender = match Gender::parse(&args[1]) {
        Some(g) => g,
        None => bail!("gender must be 'male' or 'female', got '{}'", args[1]),
    };

    // Optional flags
    let mut elements: Vec<Element> = Vec::new();
    let mut birth: Option<BirthDate> = None;
    let mut count = 5usize;
    let mut save = false;
    let mut json = false;
    let mut seed: Option<u64> = None;
    let mut dict_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--elements" => {
                i += 1;
                let raw = args.get(i).map(String::as_str).unwrap_or("");
                for part in raw.split(',') {
                    match Element::parse(part) {
                        Some(e) => elements.push(e),
                        None => bail!("unknown element '{}'", part),
                    }
                }
            }
            "--birth" => {
                i += 1;
                let raw = args.get(i).map(String::as_str).unwrap_or("");
                birth = Some(parse_birth(raw)?);
            }
            "--count" => {
                i += 1;
                count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(count);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
            }
            "--dict" => {
                i += 1;
                dict_path = args.get(i).cloned();
            }
            "--save" => save = true,
            "--json" => json = true,
            other => bail!("unknown option '{}'", other),
        }
        i += 1;
    }

    // Character dictionary: built-in pool or a user-supplied CSV
    let dict = match dict_path {
        Some(path) => CharacterDictionary::from_csv_file(&path)?,
        None => CharacterDictionary::with_defaults(),
    };
    let luck = NumberLuckTable::new();

    // Favorable elements: explicit flag wins, otherwise derive from the
    // birth chart; an invalid date degrades to no preference
    if elements.is_empty() {
        if let Some(date) = &birth {
            match analyze_birth_chart(date) {
                Ok(analysis) => {
                    println!("📅 Birth chart: {}", analysis.chart.label());
                    print!("   Elemental tally:");
                    for (element, tally) in analysis.tally.iter() {
                        print!(" {} {:.1}", element, tally);
                    }
                    println!();
                    println!(
                        "   Day master: {} ({})",
                        analysis.day_master.symbol(),
                        analysis.day_master_element
                    );
                    elements = analysis.favorable;
                    let labels: Vec<&str> = elements.iter().map(|e| e.as_str()).collect();
                    println!("   Favorable elements: {}\n", labels.join(", "));
                }
                Err(e) => {
                    println!("⚠️  {}; continuing without elemental preference\n", e);
                }
            }
        }
    }

    let request = NameRequest::with_favorable(&surname, gender, count, &elements);
    let engine = NamingEngine::new(&dict, &luck);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    println!("🔍 Searching candidates for surname {}...", surname);
    let mut results = engine.recommend(&request, &mut rng);

    if results.is_empty() {
        println!("No name cleared the score threshold. Try other favorable elements or a larger dictionary.");
        return Ok(());
    }

    // Best-effort narrative enrichment for the survivors only
    let composer = NarrativeComposer::new(&dict);
    for candidate in &mut results {
        candidate.narrative =
            Some(composer.describe(&candidate.surname, &candidate.given_name, gender, &mut rng));
    }

    if json {
        println!("{}", to_json(&results)?);
    } else {
        println!("{}", format_report(&surname, gender, &results, &luck));
    }

    if save {
        let path = save_report(&surname, gender, &results, &luck)?;
        println!("💾 Report saved to {:?}", path);
    }

    Ok(())
}

/// Parse YYYY-MM-DD or YYYY-MM-DD@HH
fn parse_birth(raw: &str) -> Result<BirthDate> {
    let (date_part, hour) = match raw.split_once('@') {
        Some((d, h)) => {
            let hour: u32 = h.parse().map_err(|_| anyhow::anyhow!("bad hour '{}'", h))?;
            (d, Some(hour))
        }
        None => (raw, None),
    };

    let parts: Vec<&str> = date_part.split('-').collect();
    if parts.len() != 3 {
        bail!("birth date must look like YYYY-MM-DD or YYYY-MM-DD@HH");
    }
    let year: i32 = parts[0].parse()?;
    let month: u32 = parts[1].parse()?;
    let day: u32 = parts[2].parse()?;

    Ok(match hour {
        Some(h) => BirthDate::with_hour(year, month, day, h),
        None => BirthDate::new(year, month, day),
    })
}

fn print_usage() {
    println!("sancai-naming v{}", sancai_naming::VERSION);
    println!("Usage: sancai-naming <surname> <male|female> [options]");
    println!();
    println!("Options:");
    println!("  --elements metal,water    favorable elements (at most 2)");
    println!("  --birth YYYY-MM-DD[@HH]   derive favorable elements from a birth chart");
    println!("  --count N                 number of names to generate (default 5)");
    println!("  --dict FILE.csv           load a custom character dictionary");
    println!("  --seed N                  seed the randomizer for reproducible output");
    println!("  --json                    print results as JSON");
    println!("  --save                    also write a timestamped report file");
}
