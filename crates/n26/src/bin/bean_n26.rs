//! bean-n26 - Import N26 bank statements into beancount.

fn main() -> std::process::ExitCode {
    n26::cmd::main()
}
