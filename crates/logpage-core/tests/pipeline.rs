use std::cell::RefCell;

use logpage_core::{
    DecodeError, DecodeOptions, DumpError, FnSource, GroupingMode, LogPageRequest, SourceError,
    UintWidth, decode_log_page, parse_schema, plan_layout,
};

const ONE_LINE_DUMP: &str = "\
Device:nvme1n1 log-id:192 namespace-id:0x1
       0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
0000: 01 00 00 00 02 00 00 00                         \"........\"
";

#[test]
fn schema_to_layout_scenario() {
    let schema = parse_schema("__u32 a; __u16 b;");
    let decls: Vec<(UintWidth, &str)> = schema
        .fields
        .iter()
        .map(|f| (f.width, f.name.as_str()))
        .collect();
    assert_eq!(decls, vec![(UintWidth::U32, "a"), (UintWidth::U16, "b")]);

    let layout = plan_layout(&schema);
    let sizes: Vec<(usize, &str)> = layout
        .fields
        .iter()
        .map(|f| (f.size, f.name.as_str()))
        .collect();
    assert_eq!(sizes, vec![(4, "a"), (2, "b")]);
    assert_eq!(layout.total_size, 6);
    assert_eq!(layout.padded_size, 8);
}

#[test]
fn end_to_end_fixed_grouping() {
    let requests = RefCell::new(Vec::new());
    let mut source = FnSource::new(|request: &LogPageRequest| {
        requests.borrow_mut().push(request.length);
        Ok(ONE_LINE_DUMP.to_string())
    });

    let report =
        decode_log_page("__u32 a; __u16 b;", &mut source, &DecodeOptions::default()).unwrap();

    assert_eq!(*requests.borrow(), vec![8]);
    assert_eq!(report.render_text(), "a                   : 1\nb                   : 2\n");
    assert_eq!(report.fields[1].size, 2);
    assert_eq!(report.fields[1].bytes, "02000000");
}

#[test]
fn end_to_end_declared_grouping() {
    let mut source = FnSource::new(|_request: &LogPageRequest| Ok(ONE_LINE_DUMP.to_string()));
    let options = DecodeOptions {
        grouping: GroupingMode::Declared,
        ..DecodeOptions::default()
    };

    let report = decode_log_page("__u32 a; __u16 b;", &mut source, &options).unwrap();

    assert_eq!(report.fields[0].value, 1);
    assert_eq!(report.fields[1].value, 2);
    assert_eq!(report.fields[1].bytes, "0200");
    assert_eq!(report.fields[1].offset, 4);
}

#[test]
fn short_output_is_detectable() {
    for text in ["", "Device:nvme1n1", "Device:nvme1n1\n       0  1  2  3"] {
        let mut source = FnSource::new(move |_request: &LogPageRequest| Ok(text.to_string()));
        let err = decode_log_page("__u32 a;", &mut source, &DecodeOptions::default())
            .expect_err("short output must fail");
        assert!(
            matches!(
                err,
                DecodeError::Dump(DumpError::MissingHeader { .. } | DumpError::NoPayload { .. })
            ),
            "unexpected error for {text:?}: {err}"
        );
    }
}

#[test]
fn failing_source_surfaces_error() {
    let mut source = FnSource::new(|_request: &LogPageRequest| {
        Err(SourceError::CommandFailed {
            status: "exit status: 1".to_string(),
            stderr: "permission denied".to_string(),
        })
    });
    let err = decode_log_page("__u32 a;", &mut source, &DecodeOptions::default()).unwrap_err();
    assert!(err.to_string().contains("permission denied"));
}
