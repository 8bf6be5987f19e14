use super::*;

use dirscan_fs::{EntryKind, NameFlags};

fn rec(name: &str, kind: EntryKind, size: u64) -> DirEntryRecord {
    DirEntryRecord {
        name: name.to_owned(),
        name_flags: NameFlags::empty(),
        kind,
        mode: 0,
        size,
        atime_secs: 1,
        mtime_secs: 2,
        ctime_secs: 3,
    }
}

fn ctx(total: usize) -> ListPrintContext<'static> {
    ListPrintContext {
        dir: ".",
        policy: "nameAsc",
        total,
        elapsed: None,
    }
}

fn print_all<P: ListingPrinter>(printer: &mut P, records: &[DirEntryRecord]) {
    let ctx = ctx(records.len());
    printer.begin(&ctx).expect("begin");
    for r in records {
        printer.print_row(r, &ctx).expect("row");
    }
    printer.finish(&ctx).expect("finish");
}

#[test]
fn human_rows_use_type_name_and_mib() {
    let records = [
        rec("sub", EntryKind::Directory, 4096),
        rec("big.bin", EntryKind::File, 5 * 1024 * 1024 + 512 * 1024),
        rec("empty", EntryKind::File, 0),
        rec("fifo", EntryKind::Other, 0),
    ];

    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), PrinterConfig::default());
    print_all(&mut printer, &records);
    let (out, err) = printer.into_parts();

    let out = String::from_utf8(out).expect("utf8");
    assert_eq!(
        out,
        "d sub 0.0M\nf big.bin 5.5M\nf empty 0.0M\nf fifo 0.0M\n"
    );

    let err = String::from_utf8(err).expect("utf8");
    assert!(err.contains("[dirscan] 4 entries in . (nameAsc)"), "{err}");
}

#[test]
fn human_colors_only_directories_when_forced() {
    let cfg = PrinterConfig {
        color: ColorChoice::Always,
        show_summary: false,
        ..PrinterConfig::default()
    };
    let records = [rec("sub", EntryKind::Directory, 0), rec("f", EntryKind::File, 0)];

    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), cfg);
    print_all(&mut printer, &records);
    let (out, err) = printer.into_parts();

    let out = String::from_utf8(out).expect("utf8");
    assert_eq!(out, "d \x1b[34msub\x1b[0m 0.0M\nf f 0.0M\n");
    assert!(err.is_empty(), "summary suppressed");
}

#[test]
fn human_auto_color_is_off_for_buffers() {
    let mut printer = HumanPrinter::new(Vec::new(), Vec::new(), PrinterConfig::default());
    print_all(&mut printer, &[rec("sub", EntryKind::Directory, 0)]);
    let (out, _) = printer.into_parts();

    assert!(!String::from_utf8(out).expect("utf8").contains('\x1b'));
}

#[test]
fn json_rows_are_ndjson_records() {
    let records = [rec("a.txt", EntryKind::File, 11), rec("sub", EntryKind::Directory, 0)];

    let cfg = PrinterConfig {
        format: OutputFormat::Json,
        ..PrinterConfig::default()
    };
    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), cfg);
    print_all(&mut printer, &records);
    let (out, err) = printer.into_parts();

    let out = String::from_utf8(out).expect("utf8");
    let rows: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json line"))
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "a.txt");
    assert_eq!(rows[0]["kind"], "file");
    assert_eq!(rows[0]["size"], 11);
    assert_eq!(rows[0]["mtime_secs"], 2);
    assert_eq!(rows[1]["kind"], "directory");

    let summary: serde_json::Value =
        serde_json::from_str(String::from_utf8(err).expect("utf8").trim()).expect("summary");
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["policy"], "nameAsc");
    assert!(summary["elapsed_ms"].is_null());
}
