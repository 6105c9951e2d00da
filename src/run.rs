use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use quiz_grader::{
    load_and_validate, review_set, score, Mode, PresentedQuestion, QuizDocument, ReviewEntry,
    ReviewScope, ScoreReport, SessionModel,
};

pub fn run(quiz_path: PathBuf, mode: &str) -> Result<()> {
    let mode = parse_mode(mode)?;

    let text = fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read {}", quiz_path.display()))?;
    let document = load_and_validate(&text)?;

    loop {
        run_attempt(&document, mode)?;

        if !confirm("Retake quiz? [y/N] ")? {
            return Ok(());
        }
    }
}

fn parse_mode(mode: &str) -> Result<Mode> {
    match mode {
        "practice" => Ok(Mode::Practice),
        "exam" => Ok(Mode::Exam),
        other => bail!("unknown mode `{other}` (expected \"practice\" or \"exam\")"),
    }
}

fn run_attempt(document: &QuizDocument, mode: Mode) -> Result<()> {
    println!("{} ({} questions)", document.title, document.questions.len());
    println!("Answer with the option number, or press enter to skip.\n");

    let mut session = SessionModel::start(document, mode);

    for index in 0..session.len() {
        ask_question(&mut session, index)?;
    }

    if !session.is_complete() {
        let unanswered = session.len() - session.answered_count();
        let grade_anyway = confirm(&format!(
            "{unanswered} question(s) unanswered. Grade anyway? [y/N] "
        ))?;
        if !grade_anyway {
            return Ok(());
        }
    }

    let report = score(&session)?;
    log::debug!(
        "graded attempt: {}/{} correct",
        report.correct_count,
        report.total_count
    );
    print_report(&report);

    match prompt("Review (a)ll, (i)ncorrect only, or press enter to finish: ")?.as_str() {
        "a" => print_review(&review_set(&session, &report, ReviewScope::All)),
        "i" => print_review(&review_set(&session, &report, ReviewScope::IncorrectOnly)),
        _ => {}
    }

    Ok(())
}

fn ask_question(session: &mut SessionModel, index: usize) -> Result<()> {
    let presented = session.presented_questions[index].clone();

    println!("Question {}: {}", index + 1, presented.question.question);
    if let Some(category) = &presented.question.category {
        println!("  [{category}]");
    }
    for (option, answer) in presented.answer_order.iter().enumerate() {
        println!("  {}. {answer}", option + 1);
    }

    loop {
        let line = prompt("> ")?;
        if line.is_empty() {
            println!();
            return Ok(());
        }

        let choice = match line.parse::<usize>() {
            Ok(choice) if (1..=presented.answer_order.len()).contains(&choice) => choice,
            _ => {
                println!("enter a number between 1 and {}", presented.answer_order.len());
                continue;
            }
        };

        let answer = &presented.answer_order[choice - 1];
        session.record_answer(index, answer.clone())?;

        if session.mode == Mode::Practice {
            print_feedback(&presented, answer);
        }

        println!();
        return Ok(());
    }
}

fn print_feedback(presented: &PresentedQuestion, answer: &str) {
    if answer == presented.question.correct_answer {
        println!("✓ Correct!");
    } else {
        println!("✗ Incorrect");
        println!("Correct answer: {}", presented.question.correct_answer);
    }

    if let Some(explanation) = &presented.question.explanation {
        println!("Explanation: {explanation}");
    }
    print_references(presented);
}

fn print_references(presented: &PresentedQuestion) {
    if let Some(references) = &presented.question.references {
        if !references.is_empty() {
            println!("References:");
            for reference in references {
                println!("  - {}", format_reference(reference));
            }
        }
    }
}

/// References that look like URLs render as links; everything else is
/// plain text.
fn format_reference(reference: &str) -> String {
    let lower = reference.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!("<{reference}>")
    } else {
        reference.to_owned()
    }
}

fn print_report(report: &ScoreReport) {
    println!("Score: {}%", report.percentage);
    println!(
        "{} correct, {} incorrect, {} total",
        report.correct_count, report.incorrect_count, report.total_count
    );

    println!("\nBy category:");
    for category in &report.by_category {
        let percentage = (category.correct as f64 / category.total as f64 * 100.0).round();
        println!(
            "  {}: {}/{} ({percentage}%)",
            category.category, category.correct, category.total
        );
    }
    println!();
}

fn print_review(entries: &[ReviewEntry]) {
    for entry in entries {
        let correct_answer = &entry.question.question.correct_answer;
        let is_correct = entry.user_answer.as_deref() == Some(correct_answer.as_str());
        let status = if is_correct { "✓" } else { "✗" };

        println!(
            "{status} Question {}: {}",
            entry.index + 1,
            entry.question.question.question
        );

        for answer in &entry.question.answer_order {
            let marker = if answer == correct_answer {
                "✓"
            } else if Some(answer.as_str()) == entry.user_answer.as_deref() {
                "✗"
            } else {
                "○"
            };
            println!("  {marker} {answer}");
        }

        match &entry.user_answer {
            Some(answer) => println!("  Your answer: {answer}"),
            None => println!("  No answer selected"),
        }
        println!("  Correct answer: {correct_answer}");

        if let Some(explanation) = &entry.question.question.explanation {
            println!("  Explanation: {explanation}");
        }
        if let Some(references) = &entry.question.question.references {
            if !references.is_empty() {
                println!("  References:");
                for reference in references {
                    println!("    - {}", format_reference(reference));
                }
            }
        }
        println!();
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_owned())
}

fn confirm(message: &str) -> Result<bool> {
    let answer = prompt(message)?;

    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
