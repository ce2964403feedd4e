//! Separation of configuration flags from the search arguments.
//!
//! Configuration flags listed in [`crate::CONFIG_CLI_FLAGS`] are handed to
//! `ortho_config`; everything from the first other token onwards is parsed
//! by `clap` as the search invocation.

use std::ffi::{OsStr, OsString};

use astsearch_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from the given program name and flags.
    ///
    /// Configuration flags must appear before the pattern; later occurrences
    /// are left for the search argument parser.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify_argument(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let Some(flag) = text.split('=').next().filter(|flag| flag.starts_with("--")) else {
        return FlagAction::Stop;
    };
    if super::CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !text.contains('='),
        }
    } else {
        FlagAction::Stop
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the recognised configuration flags.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by the remaining search arguments.
    pub(crate) search_arguments: Vec<OsString>,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            search_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut first_search_argument = None;
    while let Some(argument) = remaining.next() {
        match classify_argument(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value && let Some(value) = remaining.next() {
                    config_arguments.push(value.clone());
                }
            }
            FlagAction::Stop => {
                first_search_argument = Some(argument.clone());
                break;
            }
        }
    }

    let mut search_arguments = vec![program.clone()];
    search_arguments.extend(first_search_argument);
    search_arguments.extend(remaining.cloned());
    ConfigArgumentSplit {
        config_arguments,
        search_arguments,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case("--log-filter=debug", FlagAction::Include { needs_value: false })]
    #[case("--log-filter", FlagAction::Include { needs_value: true })]
    #[case("--excluded-dirs", FlagAction::Include { needs_value: true })]
    #[case("--debug", FlagAction::Stop)]
    #[case("f(?)", FlagAction::Stop)]
    #[case("-?", FlagAction::Stop)]
    fn arguments_are_classified(#[case] argument: &str, #[case] expected: FlagAction) {
        assert_eq!(classify_argument(OsStr::new(argument)), expected);
    }

    #[test]
    fn leading_configuration_flags_are_split_off() {
        let split = split_config_arguments(&os_args(&[
            "astsearch",
            "--log-filter",
            "debug",
            "--log-format=json",
            "f(??)",
            "src",
        ]));
        assert_eq!(
            split.config_arguments,
            os_args(&["astsearch", "--log-filter", "debug", "--log-format=json"])
        );
        assert_eq!(split.search_arguments, os_args(&["astsearch", "f(??)", "src"]));
    }

    #[test]
    fn configuration_flags_after_the_pattern_stay_with_the_search() {
        let split = split_config_arguments(&os_args(&["astsearch", "?", "--log-filter", "x"]));
        assert_eq!(split.config_arguments, os_args(&["astsearch"]));
        assert_eq!(
            split.search_arguments,
            os_args(&["astsearch", "?", "--log-filter", "x"])
        );
    }

    #[test]
    fn flag_values_are_not_mistaken_for_patterns() {
        let split = split_config_arguments(&os_args(&["astsearch", "--extensions", "pyi"]));
        assert_eq!(
            split.config_arguments,
            os_args(&["astsearch", "--extensions", "pyi"])
        );
        assert_eq!(split.search_arguments, os_args(&["astsearch"]));
    }

    #[test]
    fn empty_arguments_split_into_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert!(split.search_arguments.is_empty());
    }
}
