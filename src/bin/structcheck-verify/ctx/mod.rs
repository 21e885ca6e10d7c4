pub struct Ctx {
    pub base_ctx: structcheck::ctx::Ctx,
    pub json: bool,
    pub quiet: bool,
}

impl Ctx {
    pub fn new(cmdline_matches: &clap::ArgMatches) -> Result<Ctx, structcheck::error::StructError> {
        Ok(Ctx {
            base_ctx: structcheck::ctx::Ctx::new(cmdline_matches)?,
            json: cmdline_matches.get_flag("json"),
            quiet: cmdline_matches.get_flag("quiet"),
        })
    }

    pub fn print_lines(
        &self,
        out: &mut impl std::io::Write,
        lines: Vec<String>,
    ) -> Result<(), structcheck::error::StructError> {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    // Called for everything the checker reports while it walks. In quiet
    // mode only the final summary gets printed.
    pub fn print_event(
        &self,
        out: &mut impl std::io::Write,
        event: &structcheck::report::CheckEvent,
    ) -> Result<(), structcheck::error::StructError> {
        if self.quiet {
            return Ok(());
        }
        match event {
            structcheck::report::CheckEvent::Section(title) => {
                self.print_lines(out, structcheck::report::section_lines(title))?;
            }
            structcheck::report::CheckEvent::Entry(outcome) => {
                writeln!(out, "{}", structcheck::report::entry_line(outcome))?;
            }
        }
        Ok(())
    }
}
