use argot::{ArgumentParser, Field};

fn main() {
    let mut cli = ArgumentParser::new("summer");
    let verbose = cli
        .switch("--verbose", "enable verbose output")
        .expect("invalid parser configuration");
    let jobs = cli
        .option(
            "-j",
            Field::integer(1),
            "CONCURRENCY",
            "specify the concurrency level",
        )
        .expect("invalid parser configuration")
        .handle();
    let items = cli
        .remainder(Field::integer(0), "ITEM", "the items to sum")
        .expect("invalid parser configuration");

    cli.parse();

    let total: i64 = cli.remaining(items).into_iter().sum();
    println!(
        "sum: {total} (jobs: {j}, verbose: {v})",
        j = cli.value(jobs),
        v = cli.value(verbose)
    );
}
