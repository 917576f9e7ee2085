use polysolve::{Equation, Solution};
use std::io::{self, BufRead, BufReader, Write};

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = BufReader::new(stdin.lock()).lines();

    loop {
        print!("Equation?\n> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.is_empty() {
            break;
        }

        let equation: Equation = match line.parse() {
            Ok(equation) => equation,
            Err(e) => {
                eprintln!("Incorrect format: {}", e);
                continue;
            },
        };

        let (solution, trace) = match equation.solve(5) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Internal error: {}", e);
                continue;
            },
        };

        match solution {
            Solution::Roots(roots) if roots.is_empty() => {
                println!("No solutions.")
            },
            Solution::Roots(roots) => {
                let roots: Vec<String> =
                    roots.iter().map(ToString::to_string).collect();
                println!("x = {}", roots.join(", "));
            },
            Solution::Infinite => {
                println!("Every value of x is a solution.")
            },
            Solution::Unsupported => {
                println!("This equation is not supported.")
            },
        }

        println!("({} solution steps recorded)", trace.len());
    }

    Ok(())
}
