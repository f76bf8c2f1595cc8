use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uncontained::cli::{Cli, fmt};
use uncontained::io::LengthWriter;
use uncontained::models::ContainmentModel;
use uncontained::realizer::realize;
use uncontained::report::threshold_report;
use uncontained::utils::load_frequencies;

fn main() -> Result<()> {
    let cli = match Cli::from_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{}", Cli::usage());
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let thresholds = cli.thresholds();

    if cli.verbose {
        eprintln!("{}", fmt::header("Uncontained Configuration"));
        eprintln!("{}: {}", fmt::param_aligned("Input", 16), cli.input.display());
        eprintln!("{}: {}", fmt::param_aligned("Output", 16), cli.output.display());
        eprintln!("{}: {}", fmt::param_aligned("Genome length", 16), cli.genome_length);
        eprintln!("{}: {:?}", fmt::param_aligned("Mode", 16), cli.mode());
        if let Some(seed) = cli.seed {
            eprintln!("{}: {}", fmt::param_aligned("Random seed", 16), seed);
        }
        eprintln!("{}: {:?}", fmt::param_aligned("Thresholds", 16), thresholds);
        eprintln!();
    }

    if cli.verbose {
        eprintln!("{}", fmt::progress("Reading read lengths..."));
    }
    let (table, format) = load_frequencies(&cli.input)?;

    if cli.verbose {
        eprintln!(
            "{}",
            fmt::progress(format!(
                "Loaded {} reads with {} distinct lengths ({:?} input)",
                table.total_count(),
                table.num_lengths(),
                format
            ))
        );
    }

    let model = ContainmentModel::new(cli.genome_length)?;
    let probs = model.compute(&table);

    let degenerate = probs.degenerate_lengths();
    if !degenerate.is_empty() {
        eprintln!(
            "{}",
            fmt::warning(format!(
                "genome length {} is shorter than some read spans; {} length(s) have values outside [0, 1] (longest: {})",
                model.genome_length(),
                degenerate.len(),
                degenerate[0]
            ))
        );
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let realized = realize(&table, &probs, cli.mode(), &mut rng);

    let mut writer = LengthWriter::new(&cli.output, cli.threads)?;
    writer.write_lengths(realized.lengths())?;
    writer.finish()?;

    if cli.verbose {
        eprintln!(
            "{}",
            fmt::success(format!("Kept {} of {} reads", realized.total_kept(), table.total_count()))
        );
    }
    println!("Output non-contained read lengths to {}", cli.output.display());

    for stats in threshold_report(&table, &probs, &thresholds) {
        println!();
        println!("{}", stats);
    }

    Ok(())
}
