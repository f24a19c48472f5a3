use anyhow::{bail, Result};
use std::{
    io::Write,
    process::{Command, Stdio},
};

use tsqx::{
    alias::Aliases,
    codegen::{self, TranslateError},
    config::{Config, RunFlags},
};

fn translate(input: &str, flags: RunFlags) -> Result<String> {
    let mut output = Vec::new();
    let result = codegen::translate(
        input.as_bytes(),
        "<test>",
        &Config::with_flags(flags),
        &Aliases::default(),
        &mut output,
    );

    match result {
        Ok(()) => Ok(String::from_utf8(output)?),
        Err(TranslateError::Syntax(error)) => bail!("{}: {}", error.location(), error.val()),
        Err(error) => bail!("{}", error),
    }
}

fn run(args: &[&str], input: &str) -> Result<(Option<i32>, String, String)> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tsqx"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    Ok((output.status.code(), stdout, stderr))
}

#[test]
fn minimal_figure() -> Result<()> {
    let output = translate("A = 0,0\nB = dir 30\nA--B\n", RunFlags::empty())?;
    assert_eq!(
        output,
        "import geometry;\n\
         pair A = (0,0);\n\
         pair B = dir(30);\n\
         draw(A--B);\n\
         \n\
         dot(\"$A$\", A, dir(A));\n\
         dot(\"$B$\", B, dir(B));\n"
    );

    Ok(())
}

#[test]
fn full_figure() -> Result<()> {
    let input = "\
# acute triangle
~triangle A B C
H . = orthocenter A B C
D' ; 2N1E = foot A B C
A--B--C--cycle / 0.1 lightcyan / blue
A--D' / dashed ->
";

    let output = translate(input, RunFlags::empty())?;
    assert_eq!(
        output,
        "import geometry;\n\
         // acute triangle\n\
         pair A = dir(110);\n\
         pair B = dir(210);\n\
         pair C = dir(330);\n\
         pair H = orthocentercenter(A, B, C);\n\
         pair D_prime = foot(triangle(B, C, A).VC);\n\
         filldraw(A--B--C--cycle, opacity(0.1)+lightcyan, blue);\n\
         draw(A--D_prime, dashed, EndArrow(DefaultHead));\n\
         \n\
         dot(\"$A$\", A, dir(A));\n\
         dot(\"$B$\", B, dir(B));\n\
         dot(\"$C$\", C, dir(C));\n\
         dot(H);\n\
         label(\"$D'$\", D_prime, 2*plain.N+1*plain.E);\n"
    );

    Ok(())
}

#[test]
fn soft_labels_and_opacity() -> Result<()> {
    let input = "A = 0,0\nB ; = 1,0\nC : = 0,1\nA--B--C--cycle / 0.3 yellow / red\n";
    let output = translate(input, RunFlags::SOFT_LABEL | RunFlags::NO_TRANSPARENCY)?;

    assert!(output.contains("filldraw(A--B--C--cycle, yellow, red);\n"));
    assert!(output.ends_with(
        "\n\
         label(\"$A$\", A, dir(A));\n\
         dot(\"$B$\", B, dir(B));\n"
    ));

    Ok(())
}

#[test]
fn fractions_and_mixed_draw_options() -> Result<()> {
    let input = "M = (1/2, 1)\nA--B--C--cycle / yellow / x red\nA--B--C--cycle / yellow / red ->\n";
    let output = translate(input, RunFlags::empty())?;

    assert!(output.contains("pair M = (1/2,1);\n"));
    assert!(output.contains("fill(A--B--C--cycle, yellow); clipdraw(A--B--C--cycle, red);\n"));
    assert!(output.contains(
        "fill(A--B--C--cycle, yellow); draw(A--B--C--cycle, red, EndArrow(DefaultHead));\n"
    ));

    Ok(())
}

#[test]
fn syntax_errors_abort() -> Result<()> {
    assert!(translate("A = 0,0\nA--B / red / blue / green\n", RunFlags::empty()).is_err());
    assert!(translate("~pentagon A B C D E\n", RunFlags::empty()).is_err());
    assert!(translate("A = (0,0\n", RunFlags::empty()).is_err());

    Ok(())
}

#[test]
fn driver() -> Result<()> {
    let (status, stdout, stderr) = run(&["-p", "-s", "5cm"], "A = 0,0\n")?;
    assert_eq!(status, Some(0));
    assert!(stderr.is_empty());
    assert!(stdout.starts_with("import geometry;\nimport olympiad;\nimport cse5;\nsize(5cm);\n"));
    assert!(stdout.ends_with("pair A = (0,0);\n\ndot(\"$A$\", A, dir(A));\n"));

    let (status, stdout, stderr) = run(&[], "A = 0,0\nB = + (A\n")?;
    assert_eq!(status, Some(1));
    assert_eq!(stdout, "import geometry;\n");
    assert!(stderr.starts_with("Syntax error: "));
    assert!(stderr.contains("<stdin>:2:"));

    Ok(())
}
