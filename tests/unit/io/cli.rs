//! Tests for command-line parsing and search configuration building

#[cfg(test)]
mod tests {
    use clap::Parser;
    use sumfree_boxes::algorithm::counting::CountingBox;
    use sumfree_boxes::algorithm::feasibility::RecordMode;
    use sumfree_boxes::io::cli::{Cli, SearchRunner, parse_counting_box};
    use sumfree_boxes::io::configuration::{DEFAULT_BOX_COUNT, DEFAULT_STACK_MIB};
    use tracing::Level;

    // Tests CLI parsing with no arguments uses every default
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.boxes, DEFAULT_BOX_COUNT);
        assert_eq!(cli.domain_bound, None);
        assert_eq!(cli.stack_mib, DEFAULT_STACK_MIB);
        assert!(cli.counting.is_empty());
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by modifying the counting parser to ensure it is invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "--boxes",
            "4",
            "--domain-bound",
            "60",
            "--prefix",
            "0,1",
            "--all-ties",
            "--no-symmetry",
            "--counting",
            "2",
            "--counting",
            "3:13",
            "--no-subsequent-fill",
            "--best-hint",
            "30",
            "--json",
            "out.json",
            "--stack-mib",
            "64",
            "--quiet",
        ]);

        assert_eq!(cli.boxes, 4);
        assert_eq!(cli.domain_bound, Some(60));
        assert_eq!(cli.prefix.as_deref(), Some("0,1"));
        assert_eq!(
            cli.counting,
            vec![CountingBox::new(2), CountingBox::with_min_start(3, 13)]
        );
        assert_eq!(cli.best_hint, Some(30));
        assert_eq!(cli.stack_mib, 64);
        assert!(!cli.should_show_progress());
    }

    // Tests flags map onto the search configuration
    // Verified by inverting the symmetry flag
    #[test]
    fn test_search_config_from_flags() {
        let cli = Cli::parse_from([
            "program",
            "-b",
            "3",
            "--all-ties",
            "--no-symmetry",
            "-c",
            "2",
            "--best-hint",
            "5",
        ]);
        let config = cli.search_config();

        assert_eq!(config.box_count, 3);
        assert_eq!(config.record_mode, RecordMode::AllTies);
        assert!(!config.symmetry_breaking);
        assert!(config.subsequent_fill);
        assert_eq!(config.counting_boxes, vec![CountingBox::new(2)]);
        assert_eq!(config.initial_best, 5);
        assert_eq!(config.validate().unwrap(), 24);
    }

    // Tests verbosity and quiet select the log level
    // Verified by ignoring the quiet flag
    #[test]
    fn test_log_level() {
        assert_eq!(Cli::parse_from(["program"]).log_level(), Level::INFO);
        assert_eq!(Cli::parse_from(["program", "-v"]).log_level(), Level::DEBUG);
        assert_eq!(Cli::parse_from(["program", "-vv"]).log_level(), Level::TRACE);
        assert_eq!(Cli::parse_from(["program", "-q", "-v"]).log_level(), Level::WARN);
    }

    // Tests the BOX[:MIN] argument form
    // Verified by swapping index and threshold
    #[test]
    fn test_parse_counting_box() {
        assert_eq!(parse_counting_box("3"), Ok(CountingBox::new(3)));
        assert_eq!(
            parse_counting_box("3:13"),
            Ok(CountingBox::with_min_start(3, 13))
        );
        assert!(parse_counting_box("a").is_err());
        assert!(parse_counting_box("1:").is_err());
    }

    // Tests the BOX:MIN:MAX form, with MIN optional
    // Verified by reading MAX into the minimum start
    #[test]
    fn test_parse_counting_box_ceiling() {
        assert_eq!(
            parse_counting_box("3:13:40"),
            Ok(CountingBox::with_min_start(3, 13).with_max_start(40))
        );
        assert_eq!(
            parse_counting_box("3::40"),
            Ok(CountingBox::new(3).with_max_start(40))
        );
        assert!(parse_counting_box("3:13:").is_err());
        assert!(parse_counting_box("3:1:2:4").is_err());
    }

    // Tests --split lists resumable prefixes and excludes --prefix
    // Verified by capturing branches one level deeper than requested
    #[test]
    fn test_runner_split() {
        let cli = Cli::parse_from(["program", "-b", "2", "-q", "--split", "3"]);
        assert_eq!(cli.split, Some(3));
        let prefixes = SearchRunner::new(cli).split(3).unwrap();
        let rendered: Vec<String> = prefixes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["0,1,0", "0,1,1"]);

        let both = Cli::try_parse_from(["program", "--split", "3", "--prefix", "0"]);
        assert!(both.is_err());
    }

    // Tests execute dispatches to the split listing
    #[test]
    fn test_runner_execute() {
        let split = Cli::parse_from(["program", "-b", "2", "-q", "--split", "2"]);
        assert!(SearchRunner::new(split).execute().is_ok());

        let search = Cli::parse_from(["program", "-b", "2", "-q"]);
        assert!(SearchRunner::new(search).execute().is_ok());
    }

    // Tests a malformed counting argument is rejected by clap
    #[test]
    fn test_cli_rejects_bad_counting() {
        assert!(Cli::try_parse_from(["program", "--counting", "x:1"]).is_err());
    }

    // Tests the resume prefix is parsed from its text form
    #[test]
    fn test_resume_prefix() {
        let cli = Cli::parse_from(["program", "-p", "0 1 1"]);
        assert_eq!(cli.resume_prefix().unwrap().boxes(), &[0, 1, 1]);
        assert!(Cli::parse_from(["program"]).resume_prefix().unwrap().is_empty());
        assert!(Cli::parse_from(["program", "-p", "0,z"]).resume_prefix().is_err());
    }

    // Tests the runner searches on its own thread and returns the report
    // Verified by returning a report built from the default outcome
    #[test]
    fn test_runner_process() {
        let cli = Cli::parse_from(["program", "-b", "2", "-q"]);
        let report = SearchRunner::new(cli).process().unwrap();
        assert_eq!(report.best, 4);
        assert_eq!(report.domain_bound, 12);
        assert_eq!(report.witness, Some(vec![vec![1, 4], vec![2, 3]]));
    }

    // Tests configuration errors surface from the search thread
    #[test]
    fn test_runner_invalid_config() {
        let cli = Cli::parse_from(["program", "-b", "0", "-q"]);
        assert!(SearchRunner::new(cli).process().is_err());

        let zero_stack = Cli::parse_from(["program", "-b", "2", "-q", "--stack-mib", "0"]);
        assert!(SearchRunner::new(zero_stack).process().is_err());
    }
}
