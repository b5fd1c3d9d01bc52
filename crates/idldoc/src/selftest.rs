//! Built-in self-test suite.
//!
//! Runs when the binary is invoked with any extra argument, so a deployed
//! binary can be sanity-checked in place without a test harness. The checks
//! mirror the segmentation and preprocessing fixtures from the unit tests;
//! the preprocess checks write real side files under the working directory,
//! exactly as a generation run would.
//!
//! A failed check prints `actual != expected` and terminates with a success
//! exit status; only an I/O failure exits non-zero.

use idldoc_diagrams::{DiagramContext, FileSink, preprocess};
use idldoc_segments::{Segment, split_all};

use crate::error::CliError;
use crate::output::Output;

/// Run the whole suite.
pub(crate) fn run(output: &Output) -> Result<(), CliError> {
    output.info("running self test");

    check_split_all();
    check_preprocess()?;

    output.success("self test passed");
    Ok(())
}

fn check(actual: &str, expected: &str) {
    if actual != expected {
        println!("{actual} != {expected}");
        std::process::exit(0);
    }
}

fn check_count(actual: usize, expected: usize) {
    if actual != expected {
        println!("{actual} != {expected}");
        std::process::exit(0);
    }
}

fn check_segment(segment: &Segment, kind: &str, content: &str) {
    check(segment.kind.as_str(), kind);
    check(&segment.content, content);
}

fn check_split_all() {
    let result = split_all("123```code```abc");
    check_count(result.len(), 3);
    check_segment(&result[0], "text", "123");
    check_segment(&result[1], "code", "```code```");
    check_segment(&result[2], "text", "abc");

    let result = split_all("123\ndigraph G {\na\n}\nabc");
    check_count(result.len(), 3);
    check_segment(&result[0], "text", "123\n");
    check_segment(&result[1], "graphviz", "digraph G {\na\n}\n");
    check_segment(&result[2], "text", "abc");

    let result = split_all("```code```abc");
    check_count(result.len(), 2);
    check_segment(&result[0], "code", "```code```");
    check_segment(&result[1], "text", "abc");

    let result = split_all("```code```");
    check_count(result.len(), 1);
    check_segment(&result[0], "code", "```code```");

    let result = split_all("123\ndigraph G {\na\n}\nabc```code```abc@startumluml@enduml");
    check_count(result.len(), 6);
    check_segment(&result[0], "text", "123\n");
    check_segment(&result[1], "graphviz", "digraph G {\na\n}\n");
    check_segment(&result[2], "text", "abc");
    check_segment(&result[3], "code", "```code```");
    check_segment(&result[4], "text", "abc");
    check_segment(&result[5], "uml", "@startumluml@enduml");
}

fn check_preprocess() -> Result<(), CliError> {
    let mut ctx = DiagramContext::new("test");
    let mut sink = FileSink::new(".");

    let result = preprocess("a_t", &mut ctx, &mut sink)?;
    check(&result, "a\\_t");

    let result = preprocess("digraph G {\na\n}\n", &mut ctx, &mut sink)?;
    check(&result, "![image](images/test_0.png)\n");

    let result = preprocess("@startumluml@enduml", &mut ctx, &mut sink)?;
    check(&result, "![image](images/test_1.png)\n");

    Ok(())
}
