//! Cursor movement. Navigation is free: any question may be visited in any
//! order regardless of answered state, and there is no terminal state.

use super::session::Session;
use crate::error::SessionError;

impl Session {
    /// Advance one question. Returns `false` (and does nothing) on the last question.
    pub fn move_next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step back one question. Returns `false` (and does nothing) on the first question.
    pub fn move_previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Put the cursor on `index` directly.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` if `index >= len`; the cursor is left unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::session::tests::build_session;
    use super::*;

    #[test]
    fn move_next_stops_at_last_question() {
        let mut session = build_session(2);
        assert!(session.move_next());
        assert!(session.is_last());
        assert!(!session.move_next());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn move_previous_stops_at_first_question() {
        let mut session = build_session(3);
        assert!(!session.move_previous());
        assert_eq!(session.cursor(), 0);

        session.move_next();
        assert!(session.move_previous());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn jump_skips_unanswered_questions() {
        let mut session = build_session(5);
        for k in (0..5).rev() {
            session.jump_to(k).unwrap();
            assert_eq!(session.cursor(), k);
        }
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn jump_out_of_range_keeps_cursor() {
        let mut session = build_session(3);
        session.jump_to(1).unwrap();
        let err = session.jump_to(3).unwrap_err();
        assert_eq!(err, SessionError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn single_question_session_is_first_and_last() {
        let mut session = build_session(1);
        assert!(session.is_last());
        assert!(!session.move_next());
        assert!(!session.move_previous());
    }
}
