use cask::{ObjectContainer, Value};

use cask_error::{Context, Result, Tracked};

use cask_log::{info, error, Color, Level};

fn print_all(container: &ObjectContainer) -> Result<()> {
    for i in 0..container.size() as isize {
        let elem = container
            .get(i)
            .ctx_err_with(|| format!("failed to list position {}", i))?;
        println!("Position {}: {} ({})", i, elem, elem.type_name());
    }
    Ok(())
}

fn main() -> Result<()> {
    cask_log::init();
    cask_log::set_fmt(Level::Info, |fmt| {
        fmt
            .text("demo", |spec| spec.with_color_spec(|color| {
                color.set_fg(Some(Color::Cyan));
            }))
            .text(": ", |spec| spec)
            .message(|spec| spec);
    }).ctx_err("failed to set info format")?;
    info!("container demo started");

    let mut container = ObjectContainer::new();

    container.append("Ivanov Petr".into());
    container.append(20.into());
    container.append("FIIT-2023".into());
    container.append(4.5.into());

    container
        .insert(2, "Programming".into())
        .ctx_err("failed to insert subject")?;

    let student = container.get(0).ctx_err("failed to read student")?;
    let age = container.get(1).ctx_err("failed to read age")?;
    let subject = container.get(2).ctx_err("failed to read subject")?;

    println!("Student: {}", student.as_str().unwrap_or("<not a string>"));
    match age.as_int() {
        Some(age) => println!("Age: {}", age),
        None => println!("Age: <not an integer>"),
    }
    println!("Subject: {}", subject.as_str().unwrap_or("<not a string>"));

    println!("Has top student: {}", container.contains(&4.5));

    println!("\nAll data in the container:");
    print_all(&container)?;

    let grade = container.remove_at(3).ctx_err("failed to remove grade")?;
    info!("removed grade {}", grade);
    container.remove_value("Programming");

    println!("\nAfter removing some elements:");
    print_all(&container)?;

    println!("\nCurrent container size: {} elements", container.size());
    println!("Contents: {}", container);

    if let Err(err) = container.get(10).ctx_err_tracked("lookup past the end") {
        error!("{} at {}", err, err.location_or_this());
        for cause in err.chain().skip(1) {
            error!("  caused by: {}", cause);
        }
    }

    if let Err(err) = ObjectContainer::with_capacity(0) {
        error!("{}", err);
    }

    let first: Value = container.remove_at(0).ctx_err("failed to drain container")?;
    info!("first element was {} of type {}", first, first.type_name());

    Ok(())
}
