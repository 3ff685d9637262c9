use clap::*;
use std::io::Write;

use gvt::libs::annotation::Annotation;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("stat")
        .about("Count features per seqid and per type")
        .after_help(
            r###"
This command counts all features in a gff3/gtf annotation file in one pass. It outputs
three groups of tab-separated rows:

    seqid  <name>  <count>     features per sequence, most populated first
    type   <name>  <count>     features per type, most frequent first
    all    <track> <count>     grand total; <track> is the track name

Notes:
* Supports both plain text and gzipped (.gz) files
* The track name defaults to the file base name

Examples:
1. Count features:
   gvt stat tests/gff/S288c.gff3

2. Save the output to a file:
   gvt stat input.gtf.gz -o output.tsv

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input gff3/gtf file"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .num_args(1)
                .help("Track name; defaults to the file base name"),
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
    let infile = args.get_one::<String>("infile").unwrap();
    let name = args.get_one::<String>("name").map(|s| s.as_str());

    let anno = Annotation::from_file(infile, name)?;
    let mut writer = gvt::writer(args.get_one::<String>("outfile").unwrap());

    for (seqid, count) in anno.seqid_count() {
        writer.write_fmt(format_args!("seqid\t{}\t{}\n", seqid, count))?;
    }

    for (kind, count) in anno.feature_type_count() {
        writer.write_fmt(format_args!("type\t{}\t{}\n", kind, count))?;
    }

    writer.write_fmt(format_args!(
        "all\t{}\t{}\n",
        anno.name(),
        anno.all_feature_count()
    ))?;

    Ok(())
}
