use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("clipdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Save the readable part of a web page as Markdown")
        .arg(clap::arg!([URL] "Page to fetch"))
        .arg(
            clap::arg!(-o --"output-dir" <DIR> "Directory the Markdown file is written to (must exist)")
                .value_name("DIR")
                .default_value(".")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(
            clap::arg!(--"char-threshold" <NUM> "Minimum character threshold for content candidates")
                .default_value("500"),
        )
        .arg(clap::arg!(--"min-score" <NUM> "Minimum score the article candidate must reach").default_value("20"))
        .arg(clap::arg!(--"no-images" "Strip images from output"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "clipdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "clipdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "clipdown", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "clipdown", &completions_dir).unwrap();
}
