extern crate clap;
use clap::*;

mod cmd_gvt;

fn main() -> anyhow::Result<()> {
    let app = Command::new("gvt")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`gvt` - Genomic Viewer Tracks")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_gvt::layout::make_subcommand())
        .subcommand(cmd_gvt::stat::make_subcommand())
        .after_help(
            r###"Subcommands:

* layout - Pack annotation features of a region into display levels
* stat   - Count features per seqid and per type

Input files can be gff3 or gtf, plain or gzipped (.gz).

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("layout", sub_matches)) => cmd_gvt::layout::execute(sub_matches),
        Some(("stat", sub_matches)) => cmd_gvt::stat::execute(sub_matches),
        _ => unreachable!(),
    }
}
