//! Input capability probing.
//!
//! The orchestrator needs exactly one bit of information about its
//! environment: is there piped or redirected data waiting on standard
//! input? The answer is probed once at startup and injected into the
//! orchestrator as a plain boolean, so everything downstream can be
//! driven without a real terminal or pipe.

/// True when standard input has data ready to read.
///
/// A zero-timeout readiness poll: an interactive terminal with nothing
/// typed reads as "no", a pipe or redirected file reads as "yes".
#[cfg(unix)]
pub fn has_piped_input() -> bool {
    use std::os::unix::io::AsRawFd;

    let mut fds = libc::pollfd {
        fd: std::io::stdin().as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };
    let ready = unsafe { libc::poll(&mut fds, 1, 0) };
    ready > 0 && fds.revents & libc::POLLIN != 0
}

/// True when standard input is not an interactive terminal.
#[cfg(not(unix))]
pub fn has_piped_input() -> bool {
    use std::io::IsTerminal;

    !std::io::stdin().is_terminal()
}
