//! The style-command registry.
//!
//! Each command is a pure function from (current style, argument) to a
//! new style. Purity matters: the layout engine restores enclosing
//! styles by popping a stack, so a command must never mutate its input.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::{Error, Result};

use super::TextStyle;

/// A named, pure transformation from one text style to another.
pub type StyleCommand = fn(&TextStyle, Option<&str>) -> Result<TextStyle>;

static COMMANDS: Lazy<AHashMap<&'static str, StyleCommand>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, StyleCommand> = AHashMap::new();
    map.insert("b", bold);
    map.insert("i", italic);
    map.insert("u", underline);
    map.insert("s", strikethrough);
    map.insert("color", color);
    map.insert("size", size);
    map.insert("font", font);
    map.insert("spacing", spacing);
    map.insert("alpha", alpha);
    map
});

/// Looks up a command by tag name.
pub fn lookup(name: &str) -> Option<StyleCommand> {
    COMMANDS.get(name).copied()
}

fn bold(style: &TextStyle, _arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        bold: true,
        ..style.clone()
    })
}

fn italic(style: &TextStyle, _arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        italic: true,
        ..style.clone()
    })
}

fn underline(style: &TextStyle, _arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        underline: true,
        ..style.clone()
    })
}

fn strikethrough(style: &TextStyle, _arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        strikethrough: true,
        ..style.clone()
    })
}

fn color(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        fill_color: require_arg("color", arg)?.parse()?,
        ..style.clone()
    })
}

fn size(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        font_size: parse_number("size", require_arg("size", arg)?)?,
        ..style.clone()
    })
}

fn font(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        font_family: require_arg("font", arg)?.to_owned(),
        ..style.clone()
    })
}

fn spacing(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle> {
    Ok(TextStyle {
        letter_spacing: parse_number("spacing", require_arg("spacing", arg)?)?,
        ..style.clone()
    })
}

/// Opacity as a percentage in `[0, 100]`.
fn alpha(style: &TextStyle, arg: Option<&str>) -> Result<TextStyle> {
    let percent = parse_number("alpha", require_arg("alpha", arg)?)?;
    Ok(TextStyle {
        alpha: (percent / 100.).clamp(0., 1.),
        ..style.clone()
    })
}

fn require_arg<'a>(command: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| Error::InvalidCommandArgument {
        command: command.to_owned(),
        arg: String::new(),
    })
}

fn parse_number(command: &str, arg: &str) -> Result<f32> {
    arg.trim()
        .parse()
        .map_err(|_| Error::InvalidCommandArgument {
            command: command.to_owned(),
            arg: arg.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use crate::Color;

    use super::*;

    #[test]
    fn commands_are_pure() {
        let base = TextStyle::default();
        let bolded = lookup("b").unwrap()(&base, None).unwrap();

        assert!(bolded.bold);
        assert!(!base.bold);
        assert_eq!(bolded.font_size, base.font_size);
    }

    #[test]
    fn color_and_size() {
        let base = TextStyle::default();

        let red = lookup("color").unwrap()(&base, Some("#ff0000")).unwrap();
        assert_eq!(red.fill_color, Color::rgb(255, 0, 0));

        let big = lookup("size").unwrap()(&base, Some("32")).unwrap();
        assert_eq!(big.font_size, 32.);
    }

    #[test]
    fn alpha_is_percent() {
        let base = TextStyle::default();
        let faded = lookup("alpha").unwrap()(&base, Some("50")).unwrap();
        assert_eq!(faded.alpha, 0.5);
    }

    #[test]
    fn missing_or_bad_arguments() {
        let base = TextStyle::default();

        assert!(matches!(
            lookup("size").unwrap()(&base, None),
            Err(Error::InvalidCommandArgument { .. })
        ));
        assert!(matches!(
            lookup("size").unwrap()(&base, Some("huge")),
            Err(Error::InvalidCommandArgument { .. })
        ));
        assert!(matches!(
            lookup("color").unwrap()(&base, Some("red")),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn unknown_commands_are_absent() {
        assert!(lookup("blink").is_none());
    }
}
