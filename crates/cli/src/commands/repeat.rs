//! `parrot repeat` — say it back.

use parrot_participant::repeat_message;

pub fn run(text: Option<String>) {
    println!("{}", repeat_message(text.as_deref()));
}
