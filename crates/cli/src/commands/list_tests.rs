use super::*;

use std::fs::{create_dir, write};

use clap::Parser;

use crate::printer::{HumanPrinter, PrinterConfig};

#[derive(Debug, Parser)]
struct TestCli {
    #[command(flatten)]
    list: ListArgs,
}

fn parse(args: &[&str]) -> ListArgs {
    let argv = std::iter::once("dirscan").chain(args.iter().copied());
    TestCli::try_parse_from(argv).expect("valid args").list
}

#[test]
fn resolve_policy_precedence() {
    let cases: &[(&[&str], Option<&str>, OrderingPolicy)] = &[
        (&[], None, OrderingPolicy::NameAsc),
        (&["-r"], None, OrderingPolicy::NameDesc),
        (&["--sort", "size"], None, OrderingPolicy::SizeAsc),
        (&["--sort", "time", "--reverse"], None, OrderingPolicy::TimeDesc),
        (&["--policy", "sizeDesc"], None, OrderingPolicy::SizeDesc),
        (&["-p", "-time"], Some("nameAsc"), OrderingPolicy::TimeDesc),
        (&[], Some("size-desc"), OrderingPolicy::SizeDesc),
        (&["-r"], Some("size-desc"), OrderingPolicy::SizeAsc),
        (&["--sort", "name"], Some("timeDesc"), OrderingPolicy::NameAsc),
        (&[], Some("bogus"), OrderingPolicy::NameAsc),
    ];

    for (argv, env, expected) in cases {
        let args = parse(argv);
        assert_eq!(
            args.resolve_policy(*env),
            *expected,
            "args {:?}, env {:?}",
            argv,
            env
        );
    }
}

#[test]
fn policy_flag_conflicts_with_sort_and_reverse() {
    for argv in [
        ["dirscan", "--policy", "nameAsc", "--sort", "size"].as_slice(),
        ["dirscan", "--policy", "nameAsc", "--reverse"].as_slice(),
    ] {
        assert!(TestCli::try_parse_from(argv).is_err(), "{argv:?}");
    }
}

#[test]
fn invalid_policy_is_rejected_by_parser() {
    assert!(TestCli::try_parse_from(["dirscan", "--policy", "owner"]).is_err());
}

#[test]
fn scan_options_follow_flags_and_env() {
    let args = parse(&[]);
    assert_eq!(args.scan_options(false).metadata_policy, MetadataPolicy::Lenient);
    assert_eq!(args.scan_options(true).metadata_policy, MetadataPolicy::Strict);
    assert!(!args.scan_options(false).include_dot_entries);

    let args = parse(&["--strict", "-a", "some/dir"]);
    let opts = args.scan_options(false);
    assert_eq!(opts.metadata_policy, MetadataPolicy::Strict);
    assert!(opts.include_dot_entries);
    assert_eq!(args.dir, Some(PathBuf::from("some/dir")));
}

#[test]
fn print_listing_renders_scanned_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    create_dir(tmp.path().join("sub")).expect("create sub");
    write(tmp.path().join("f.txt"), vec![0u8; 1024 * 1024]).expect("write file");

    let policy = OrderingPolicy::SizeDesc;
    let records = scan_directory_with(tmp.path(), &ScanOptions::default(), |a, b| {
        policy.compare(a, b)
    })
    .expect("scan");

    let cfg = PrinterConfig {
        show_summary: false,
        ..PrinterConfig::default()
    };
    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), cfg);
    print_listing(&mut printer, tmp.path(), policy, &records, None).expect("print");
    let (out, _) = printer.into_parts();

    let out = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&"f f.txt 1.0M"), "{out}");
    assert!(lines.iter().any(|l| l.starts_with("d sub ")), "{out}");
}

#[test]
fn open_failures_exit_with_one() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("missing");

    let err = scan_directory_with(&missing, &ScanOptions::default(), |a, b| {
        OrderingPolicy::NameAsc.compare(a, b)
    })
    .expect_err("missing dir");

    assert_eq!(exit_code_for(&anyhow::Error::from(err)), 1);
    assert_eq!(exit_code_for(&anyhow::anyhow!("write failed")), 2);
}

#[test]
fn output_flags_select_printer_config() {
    let cases: &[(&[&str], OutputFormat, ColorChoice, bool)] = &[
        (&[], OutputFormat::Human, ColorChoice::Auto, true),
        (&["--json"], OutputFormat::Json, ColorChoice::Auto, true),
        (&["--color", "never", "-q"], OutputFormat::Human, ColorChoice::Never, false),
        (&["--json", "--color", "always"], OutputFormat::Json, ColorChoice::Always, true),
    ];

    for (argv, format, color, summary) in cases {
        let cfg = parse(argv).output.printer_config();
        assert_eq!(cfg.format, *format, "args {argv:?}");
        assert_eq!(cfg.color, *color, "args {argv:?}");
        assert_eq!(cfg.show_summary, *summary, "args {argv:?}");
    }
}

#[test]
fn unknown_color_is_rejected_by_parser() {
    assert!(TestCli::try_parse_from(["dirscan", "--color", "blue"]).is_err());
}
