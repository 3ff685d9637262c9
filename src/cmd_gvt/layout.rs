use clap::*;
use std::io::Write;

use gvt::libs::annotation::Annotation;
use gvt::libs::level::Level;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("layout")
        .about("Pack annotation features of a region into display levels")
        .after_help(
            r###"
This command reads a gff3/gtf annotation file, fetches the features overlapping each
requested region, and assigns every feature to a display level so that features sharing
a level never overlap. Output is tab-separated:

    seqid  ID  start  end  level  style

* Coordinates are reported 0-based half-open.
* Positive-strand features get levels 1..depth, negative-strand features -1..-depth,
  unstranded features the single level 0.
* A feature for which no level is free within the depth budget is silently dropped;
  use --verbose to see per-region counts on stderr.
* Each region is packed independently, starting from empty levels.

Range format:
    seq_name:start-end

* seq_name: Required, sequence identifier
* start-end: Optional, 1-based coordinates; a bare seq_name takes the whole sequence

Examples:
1. Pack all genes of a region:
   gvt layout tests/gff/S288c.gff3 I:1-50000 --type gene

2. Whole seqids, deeper budget, keep unstranded features:
   gvt layout input.gtf.gz I II --depth 20 --keep-unstranded

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input gff3/gtf file"),
        )
        .arg(
            Arg::new("ranges")
                .required(true)
                .index(2)
                .num_args(1..)
                .help("Regions of interest"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .short('t')
                .num_args(1)
                .help("Comma-separated feature types to keep; default keeps all"),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .num_args(1)
                .default_value("10")
                .value_parser(value_parser!(i32).range(1..))
                .help("Maximal number of levels per strand"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .num_args(1)
                .default_value("10")
                .value_parser(value_parser!(usize))
                .help("Minimal distance between 2 contiguous features on the same level"),
        )
        .arg(
            Arg::new("filter_pos")
                .long("filter-pos")
                .action(ArgAction::SetTrue)
                .help("Filter out features on the positive strand"),
        )
        .arg(
            Arg::new("filter_neg")
                .long("filter-neg")
                .action(ArgAction::SetTrue)
                .help("Filter out features on the negative strand"),
        )
        .arg(
            Arg::new("keep_unstranded")
                .long("keep-unstranded")
                .action(ArgAction::SetTrue)
                .help("Keep features with no strand specified; filtered out by default"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Print per-region counts to stderr"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let max_depth = *args.get_one::<i32>("depth").unwrap();
    let offset = *args.get_one::<usize>("offset").unwrap();
    let verbose = args.get_flag("verbose");

    let types: Vec<String> = match args.get_one::<String>("type") {
        Some(s) => s.split(',').map(|t| t.to_string()).collect(),
        None => vec![],
    };

    let ranges: Vec<String> = args
        .get_many::<String>("ranges")
        .unwrap()
        .cloned()
        .collect();

    //----------------------------
    // Open files
    //----------------------------
    let anno = Annotation::from_file(infile, None)?;
    let mut writer = gvt::writer(args.get_one::<String>("outfile").unwrap());

    //----------------------------
    // Output
    //----------------------------
    for el in ranges.iter() {
        let rg = intspan::Range::from_str(el);
        let seq_id = rg.chr();

        if !anno.seqids().contains(&seq_id.as_str()) {
            eprintln!("{} for [{}] not found in the annotation file", seq_id, el);
            continue;
        }

        // intspan::Range::from_str("chr1") -> start=0, end=0
        let (start, end) = if *rg.start() == 0 {
            (None, None)
        } else {
            // Convert 1-based inclusive to 0-based half-open
            let s = (*rg.start() as usize).saturating_sub(1);
            let e = *rg.end() as usize;
            (Some(s), Some(e))
        };

        // every region is packed from a fresh level map
        let mut lv = Level::new()
            .with_max_depth(max_depth)
            .with_offset(offset)
            .with_filter_pos(args.get_flag("filter_pos"))
            .with_filter_neg(args.get_flag("filter_neg"))
            .with_filter_unstrand(!args.get_flag("keep_unstranded"));

        let mut assigned = 0;
        for ft in anno.interval_features(seq_id, start, end, &types) {
            if let Some(ef) = lv.assign(&ft.id, ft.start, ft.end, ft.strand) {
                assigned += 1;
                writer.write_fmt(format_args!(
                    "{}\t{}\t{}\t{}\t{}\t{}\n",
                    seq_id, ef.id, ef.start, ef.end, ef.level, ef.style
                ))?;
            }
        }

        if verbose {
            let count = lv.count();
            eprintln!(
                "{}\tall={}\tpos={}\tneg={}\tunstrand={}\tassigned={}",
                el, count.all, count.positive, count.negative, count.unstranded, assigned
            );
        }
    }

    Ok(())
}
