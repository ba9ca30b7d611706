use clap::Parser;
use jooser::contact_matrix::{default_chrom_sizes_path, JuicerPre};
use jooser::output::write_stats;
use jooser::{Config, FragmentMap, LigationMotif, SortedGzipSink, StreamReducer};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "jooser")]
#[command(about = "Build merged_nodups Hi-C contacts from name-grouped BAM files", long_about = None)]
struct Args {
    /// Input BAM file, grouped by read name
    #[arg(short, long)]
    input: PathBuf,

    /// Output merged_nodups file (sorted, gzip-compressed)
    #[arg(short, long)]
    output: PathBuf,

    /// Output statistics JSON
    #[arg(short, long)]
    stats: PathBuf,

    /// Restriction-site map (one line per contig: name and ascending cut positions)
    #[arg(short, long)]
    fragment_map: Option<PathBuf>,

    /// Restriction enzyme used for ligation-junction statistics
    #[arg(short, long)]
    enzyme: Option<String>,

    /// Explicit ligation-junction regex (overrides --enzyme)
    #[arg(long)]
    ligation_motif: Option<String>,

    /// Minimum mapping quality of both contact endpoints (0 disables)
    #[arg(short = 'q', long, default_value_t = 0)]
    min_mapq: u8,

    /// juicer_tools jar for building a .hic contact matrix afterwards
    #[arg(long, requires = "hic_output")]
    juicer_jar: Option<PathBuf>,

    /// Output .hic file
    #[arg(long, requires = "juicer_jar")]
    hic_output: Option<PathBuf>,

    /// Chromosome sizes file (written from the BAM header when omitted)
    #[arg(long)]
    chrom_sizes: Option<PathBuf>,

    /// Number of threads for the contact-matrix builder
    #[arg(short, long, default_value_t = 4)]
    threads: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let ligation = match (&args.ligation_motif, &args.enzyme) {
        (Some(pattern), _) => Some(LigationMotif::from_pattern(pattern)?),
        (None, Some(enzyme)) => Some(LigationMotif::for_enzyme(enzyme)?),
        (None, None) => None,
    };

    let fragment_map = match &args.fragment_map {
        Some(path) => {
            let map = FragmentMap::load(path)?;
            info!(
                "Loaded fragment map {}: {} contigs, {} cut sites",
                path.display(),
                map.contig_count(),
                map.cut_count()
            );
            Some(Arc::new(map))
        }
        None => {
            info!("No fragment map given, writing placeholder fragments");
            None
        }
    };

    info!("Reading BAM file: {}", args.input.display());
    let (contigs, records) = jooser::bam::open(&args.input)?;
    info!("Reference has {} contigs", contigs.len());
    let contigs = Arc::new(contigs);

    let config = Config::new(args.min_mapq, fragment_map, ligation, Arc::clone(&contigs));
    info!("Min MapQ: {}", config.min_mapq);
    if let Some(motif) = &config.ligation {
        info!("Ligation motif: {}", motif.label);
    }

    let sink = SortedGzipSink::spawn(&args.output)?;
    let mut reducer = StreamReducer::new(&config, sink);
    info!("Processing read groups...");
    reducer.process(records)?;
    let (stats, _) = reducer.finish()?;
    info!("Wrote merged_nodups to {}", args.output.display());

    let summary = stats.finalize(config.ligation.as_ref().map(|m| m.label.as_str()));
    summary.print_summary();
    write_stats(&summary, &args.stats)?;
    info!("Wrote statistics to {}", args.stats.display());

    if let (Some(jar), Some(hic_output)) = (&args.juicer_jar, &args.hic_output) {
        let chrom_sizes = match &args.chrom_sizes {
            Some(path) => path.clone(),
            None => {
                let path = default_chrom_sizes_path(hic_output);
                contigs.write_chrom_sizes(&path)?;
                path
            }
        };
        JuicerPre {
            jar: jar.clone(),
            threads: args.threads,
            fragment_map: args.fragment_map.clone(),
            merged_nodups: args.output.clone(),
            hic_output: hic_output.clone(),
            chrom_sizes,
        }
        .run()?;
    }

    info!("Done!");
    Ok(())
}
