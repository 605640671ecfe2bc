use anyhow::Context;
use stddraw::{init_logging, DrawConfig, LoggingConfig, NamedColor, StdDraw};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = DrawConfig::default()
        .with_title("StdDraw test client")
        .with_close_on_drop(false);
    let mut draw = StdDraw::new(config).context("failed to set up the drawing session")?;

    draw_test_client(&mut draw)?;
    log::info!("{} shapes recorded; close the window to exit", draw.shapes().len());

    draw.wait().context("rendering thread failed")?;
    Ok(())
}

fn draw_test_client(draw: &mut StdDraw) -> anyhow::Result<()> {
    draw.square(0.2, 0.8, 0.1)?;
    draw.filled_square(0.8, 0.8, 0.2)?;
    draw.circle(0.8, 0.2, 0.2)?;

    draw.set_pen_color(NamedColor::BookRed);
    draw.set_pen_radius(0.02)?;
    draw.arc(0.8, 0.2, 0.1, 200.0, 45.0)?;

    // blue diamond
    draw.reset_pen_radius();
    draw.set_pen_color(NamedColor::BookBlue);
    let x = [0.1, 0.2, 0.3, 0.2];
    let y = [0.2, 0.3, 0.2, 0.1];
    draw.filled_polygon(&x, &y)?;

    draw.set_pen_color(NamedColor::Black);
    draw.text(0.2, 0.5, "black text")?;
    draw.set_pen_color(NamedColor::White);
    draw.text(0.8, 0.8, "white text")?;
    Ok(())
}
