use crate::ports::outbound::NotificationPort;

/// Shows notifications on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl NotificationPort for TerminalNotifier {
    fn show_message(&self, message: &str) {
        println!(">> {}", message);
    }
}
