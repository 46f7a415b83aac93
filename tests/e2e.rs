use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_vend-eng"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn valid_session() {
    let (stdout, stderr, success) = run("session.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "name,kind,unit_value,count",
            "five_cents,coin,0.05,10",
            "ten_cents,coin,0.10,10",
            "twenty_cents,coin,0.20,10",
            "fifty_cents,coin,0.50,10",
            "one_dollar,coin,1.00,6",
            "two_dollars,coin,2.00,6",
            "coke,product,1.50,3",
            "pepsi,product,1.45,5",
            "water,product,0.90,5",
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized op 'tilt'"));
    assert!(stderr.contains("unrecognized coin 'three_dollars'"));
    assert!(stderr.contains("select missing selector"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "name,kind,unit_value,count");
    // the valid ops still went through: a coke was sold for a two-dollar
    // coin with fifty cents change
    assert!(lines.contains(&"fifty_cents,coin,0.50,9"));
    assert!(lines.contains(&"two_dollars,coin,2.00,6"));
    assert!(lines.contains(&"coke,product,1.50,4"));
}

#[test]
fn generated_session_resets_to_initial_stocking() {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("failed to create temp file");
    write!(
        file,
        "op,arg\n\
         insert,two_dollars\n\
         select,coke\n\
         insert,one_dollar\n\
         reset,\n"
    )
    .expect("failed to write temp session");

    let output = Command::new(env!("CARGO_BIN_EXE_vend-eng"))
        .arg(file.path())
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "name,kind,unit_value,count",
            "five_cents,coin,0.05,10",
            "ten_cents,coin,0.10,10",
            "twenty_cents,coin,0.20,10",
            "fifty_cents,coin,0.50,10",
            "one_dollar,coin,1.00,5",
            "two_dollars,coin,2.00,5",
            "coke,product,1.50,5",
            "pepsi,product,1.45,5",
            "water,product,0.90,5",
        ]
    );
}
