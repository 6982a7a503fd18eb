use argot::{ArgumentParser, Field};

fn main() {
    let mut cli = ArgumentParser::new("demo");
    let build_dir = cli
        .option(
            "--build-dir",
            Field::directory("."),
            "BUILDDIR",
            "specify the build directory",
        )
        .expect("invalid parser configuration")
        .handle();
    let some_file = cli
        .option(
            "--some-file",
            Field::file("main.cpp", "*.cpp"),
            "FILE",
            "specify some file",
        )
        .expect("invalid parser configuration")
        .handle();
    let name = cli
        .option(
            "--name",
            Field::string("themaster"),
            "NAME",
            "specify some name",
        )
        .expect("invalid parser configuration")
        .handle();
    let jobs = cli
        .option(
            "-j",
            Field::integer(42),
            "CONCURRENCY",
            "specify the concurrency level",
        )
        .expect("invalid parser configuration")
        .handle();
    let mode = cli
        .option(
            "--mode",
            Field::choice_described(
                "demonstrate",
                ["demonstrate", "party", "lazy"],
                ["demonstrate usage", "do something crazy", "do nothing"],
            ),
            "MODE",
            "specify running mode",
        )
        .expect("invalid parser configuration")
        .handle();
    let undoc_mode = cli
        .option(
            "--undoc-mode",
            Field::choice("demonstrate", ["demonstrate", "party", "lazy"]),
            "MODE",
            "specify running mode but don't expect docs",
        )
        .expect("invalid parser configuration")
        .handle();

    cli.parse();

    println!("build-dir: {}", cli.value(build_dir));
    println!("some-file: {}", cli.value(some_file));
    println!("name: {}", cli.value(name));
    println!("jobs: {}", cli.value(jobs));
    println!("mode: {}", cli.value(mode));
    println!("undoc-mode: {}", cli.value(undoc_mode));
}
