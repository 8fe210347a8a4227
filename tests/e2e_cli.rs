mod support;

use support::{closed_address, live_address_or_skip, run_kvmark, unique_prefix};

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_cli_lists_commands() -> Result<(), String> {
    let output = run_kvmark(["--list-commands"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    for expected in ["hset", "lpushx", "pfmerge", "zincrby"] {
        if !names.contains(&expected) {
            return Err(format!("Missing {} in {:?}", expected, names));
        }
    }
    Ok(())
}

#[test]
fn e2e_cli_requires_commands() -> Result<(), String> {
    let output = run_kvmark(["--address", "127.0.0.1:1"])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_cli_rejects_zero_iterations() -> Result<(), String> {
    let output = run_kvmark(["--commands", "set", "--iterations", "0"])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_cli_fails_on_unreachable_store() -> Result<(), String> {
    let address = closed_address()?;
    let output = run_kvmark([
        "--address",
        address.as_str(),
        "--commands",
        "set",
        "--iterations",
        "1",
    ])?;
    if output.status.success() {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_cli_json_report() -> Result<(), String> {
    let Some(address) = live_address_or_skip()? else {
        return Ok(());
    };
    let prefix = unique_prefix("cli");
    let output = run_kvmark([
        "--address",
        address.as_str(),
        "--commands",
        "set,hset",
        "--iterations",
        "5,10",
        "--key-prefix",
        prefix.as_str(),
        "--throughput",
        "set",
        "--throughput-duration",
        "300ms",
        "--output-format",
        "json",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid json: {}\n{}", err, describe(&output)))?;
    let trials = report
        .get("trials")
        .and_then(serde_json::Value::as_array)
        .ok_or("Missing trials")?;
    if trials.len() != 4 {
        return Err(format!("Expected 4 trials, got {}", trials.len()));
    }
    let run_log = report
        .get("run_log")
        .and_then(serde_json::Value::as_array)
        .ok_or("Missing run log")?;
    if run_log.len() != 4 {
        return Err(format!("Expected 4 run log entries, got {}", run_log.len()));
    }
    let completed = report
        .get("throughput")
        .and_then(|throughput| throughput.get("completed"))
        .and_then(serde_json::Value::as_u64)
        .ok_or("Missing throughput")?;
    if completed == 0 {
        return Err("Expected throughput above zero".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_cli_text_report_with_random_keys() -> Result<(), String> {
    let Some(address) = live_address_or_skip()? else {
        return Ok(());
    };
    let prefix = unique_prefix("cli-text");
    let output = run_kvmark([
        "--address",
        address.as_str(),
        "--commands",
        "set",
        "--iterations",
        "3",
        "--average",
        "2",
        "--random-keys",
        "--key-prefix",
        prefix.as_str(),
        "--no-color",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Total Calls: 6") || !stdout.contains("100.00%") {
        return Err(describe(&output));
    }
    Ok(())
}
