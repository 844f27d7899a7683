// Copyright 2015-2021 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::ModelError;

const LIST_START: u8 = 1;
const OBJECT_START: u8 = 2;
const PROPERTY_START: u8 = 4;
const STRING: u8 = 8;
const COLON: u8 = 16;

/// The pushdown automaton enforcing structural validity on the event stream,
/// shared by the readers and writers of both textual dialects.
///
/// Every event is presented through one of the `put_*` methods, which first
/// checks that the event is legal in the current state and then updates the
/// symbol stack and flags. A rejected event leaves the analyzer in a terminal
/// failed state: all further events are rejected as well.
#[derive(Debug)]
pub(crate) struct GrammarAnalyzer {
    stack: Vec<u8>,
    comma_expected: bool,
    colon_expected: bool,
    property_end_expected: bool,
    has_event: bool,
    finished: bool,
}

impl GrammarAnalyzer {
    pub(crate) fn new() -> GrammarAnalyzer {
        GrammarAnalyzer {
            stack: Vec::with_capacity(8),
            comma_expected: false,
            colon_expected: false,
            property_end_expected: false,
            has_event: false,
            finished: false,
        }
    }

    pub(crate) fn is_comma_expected(&self) -> bool {
        self.comma_expected
    }

    pub(crate) fn is_colon_expected(&self) -> bool {
        self.colon_expected
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    fn top(&self) -> u8 {
        *self.stack.last().unwrap_or(&0)
    }

    /// Pops the symbol of a completed value and updates the separator flags.
    /// A value sitting above a `COLON` completes a key/value pair, so the
    /// colon and its key are popped as well.
    fn complete_value(&mut self) {
        if self.stack.is_empty() {
            self.finished = true;
            return;
        }
        if self.top() == COLON {
            self.stack.truncate(self.stack.len() - 2);
        }
        self.comma_expected = true;
        self.property_end_expected = self.top() == PROPERTY_START;
    }

    pub(crate) fn put_object_start(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.comma_expected
            || (!self.stack.is_empty() && self.top() & (LIST_START | COLON) == 0)
        {
            return Err(self.fail());
        }
        self.has_event = true;
        self.stack.push(OBJECT_START);
        Ok(())
    }

    pub(crate) fn put_list_start(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.comma_expected
            || (!self.stack.is_empty() && self.top() & (LIST_START | COLON) == 0)
        {
            return Err(self.fail());
        }
        self.has_event = true;
        self.stack.push(LIST_START);
        Ok(())
    }

    pub(crate) fn put_property_start(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.comma_expected
            || (!self.stack.is_empty() && self.top() & (LIST_START | COLON) == 0)
        {
            return Err(self.fail());
        }
        self.has_event = true;
        self.stack.push(PROPERTY_START);
        Ok(())
    }

    pub(crate) fn put_object_end(&mut self) -> Result<(), ModelError> {
        if self.finished || self.top() != OBJECT_START || !self.has_event {
            return Err(self.fail());
        }
        self.has_event = true;
        self.stack.pop();
        if self.stack.is_empty() {
            self.finished = true;
        } else {
            self.complete_value();
        }
        Ok(())
    }

    pub(crate) fn put_list_end(&mut self) -> Result<(), ModelError> {
        if self.finished || self.top() != LIST_START || !self.has_event {
            return Err(self.fail());
        }
        self.has_event = true;
        self.stack.pop();
        if self.stack.is_empty() {
            self.finished = true;
        } else {
            self.complete_value();
        }
        Ok(())
    }

    pub(crate) fn put_property_end(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.top() != PROPERTY_START
            || !self.property_end_expected
            || !self.has_event
        {
            return Err(self.fail());
        }
        self.has_event = true;
        self.property_end_expected = false;
        self.stack.pop();
        if self.stack.is_empty() {
            self.finished = true;
        } else {
            self.complete_value();
        }
        Ok(())
    }

    /// A string is a key under `OBJECT_START` or `PROPERTY_START` and a plain
    /// scalar value everywhere else.
    pub(crate) fn put_string(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.comma_expected
            || self.property_end_expected
            || (!self.stack.is_empty()
                && self.top() & (OBJECT_START | LIST_START | PROPERTY_START | COLON) == 0)
        {
            return Err(self.fail());
        }
        self.has_event = true;
        if self.stack.is_empty() {
            self.finished = true;
            return Ok(());
        }
        if self.top() == OBJECT_START || self.top() == PROPERTY_START {
            self.stack.push(STRING);
            self.colon_expected = true;
            return Ok(());
        }
        self.complete_value();
        Ok(())
    }

    pub(crate) fn put_number(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    pub(crate) fn put_boolean(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    pub(crate) fn put_bytes(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    pub(crate) fn put_expression(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    pub(crate) fn put_type(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    pub(crate) fn put_undefined(&mut self) -> Result<(), ModelError> {
        self.put_scalar()
    }

    fn put_scalar(&mut self) -> Result<(), ModelError> {
        if self.finished
            || self.comma_expected
            || (!self.stack.is_empty() && self.top() & (LIST_START | COLON) == 0)
        {
            return Err(self.fail());
        }
        self.has_event = true;
        if self.stack.is_empty() {
            self.finished = true;
            return Ok(());
        }
        self.complete_value();
        Ok(())
    }

    pub(crate) fn put_colon(&mut self) -> Result<(), ModelError> {
        if self.finished || self.top() != STRING {
            return Err(self.fail());
        }
        self.has_event = false;
        self.stack.push(COLON);
        self.colon_expected = false;
        Ok(())
    }

    pub(crate) fn put_comma(&mut self) -> Result<(), ModelError> {
        if self.finished || !self.comma_expected {
            return Err(self.fail());
        }
        self.has_event = false;
        self.comma_expected = false;
        Ok(())
    }

    /// The "expecting ..." description of what would currently be legal.
    pub(crate) fn expecting(&self) -> String {
        const VALUES: &str = "OBJECT_START or LIST_START or PROPERTY_START or STRING \
             or EXPRESSION or BYTES or NUMBER or BOOLEAN or TYPE or UNDEFINED";
        let message = if self.stack.is_empty() {
            if !self.finished {
                format!("Expecting {}", VALUES)
            } else {
                "Expecting EOF".to_owned()
            }
        } else {
            match self.top() {
                OBJECT_START => {
                    if self.comma_expected {
                        "Expecting ',' or OBJECT_END".to_owned()
                    } else if self.has_event {
                        "Expecting OBJECT_END or STRING".to_owned()
                    } else {
                        "Expecting STRING".to_owned()
                    }
                }
                PROPERTY_START => {
                    if self.property_end_expected {
                        "Expecting PROPERTY_END".to_owned()
                    } else {
                        "Expecting STRING".to_owned()
                    }
                }
                LIST_START => {
                    if self.comma_expected {
                        "Expecting ',' or LIST_END".to_owned()
                    } else if self.has_event {
                        format!("Expecting LIST_END or {}", VALUES)
                    } else {
                        format!("Expecting {}", VALUES)
                    }
                }
                COLON => format!("Expecting {}", VALUES),
                _ => "Expecting ':'".to_owned(),
            }
        };
        message
    }

    fn fail(&mut self) -> ModelError {
        let error = ModelError::grammar(self.expecting());
        self.finished = true;
        self.has_event = false;
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_scalar_finishes() {
        let mut g = GrammarAnalyzer::new();
        g.put_number().unwrap();
        assert!(g.is_finished());
        assert!(g.put_number().is_err());
    }

    #[test]
    fn object_with_two_entries() {
        let mut g = GrammarAnalyzer::new();
        g.put_object_start().unwrap();
        g.put_string().unwrap();
        assert!(g.is_colon_expected());
        g.put_colon().unwrap();
        g.put_number().unwrap();
        assert!(g.is_comma_expected());
        g.put_comma().unwrap();
        g.put_string().unwrap();
        g.put_colon().unwrap();
        g.put_string().unwrap();
        g.put_object_end().unwrap();
        assert!(g.is_finished());
    }

    #[test]
    fn empty_containers() {
        let mut g = GrammarAnalyzer::new();
        g.put_object_start().unwrap();
        g.put_object_end().unwrap();
        assert!(g.is_finished());

        let mut g = GrammarAnalyzer::new();
        g.put_list_start().unwrap();
        g.put_list_end().unwrap();
        assert!(g.is_finished());
    }

    #[test]
    fn property_holds_exactly_one_pair() {
        let mut g = GrammarAnalyzer::new();
        g.put_property_start().unwrap();
        g.put_string().unwrap();
        g.put_colon().unwrap();
        g.put_boolean().unwrap();
        // A second key is not allowed once the pair is complete.
        let err = g.put_string().unwrap_err();
        assert_eq!(err.to_string(), "Expecting PROPERTY_END");
    }

    #[test]
    fn property_end_requires_a_pair() {
        let mut g = GrammarAnalyzer::new();
        g.put_property_start().unwrap();
        assert!(g.put_property_end().is_err());
    }

    #[test]
    fn leading_comma_in_list_is_rejected() {
        let mut g = GrammarAnalyzer::new();
        g.put_list_start().unwrap();
        let err = g.put_comma().unwrap_err();
        assert!(err.to_string().starts_with("Expecting"));
    }

    #[test]
    fn trailing_comma_in_object_is_rejected() {
        let mut g = GrammarAnalyzer::new();
        g.put_object_start().unwrap();
        g.put_string().unwrap();
        g.put_colon().unwrap();
        g.put_number().unwrap();
        g.put_comma().unwrap();
        let err = g.put_object_end().unwrap_err();
        assert_eq!(err.to_string(), "Expecting STRING");
    }

    #[test]
    fn object_key_must_be_string() {
        let mut g = GrammarAnalyzer::new();
        g.put_object_start().unwrap();
        assert!(g.put_number().is_err());
    }

    #[test]
    fn missing_colon_is_rejected() {
        let mut g = GrammarAnalyzer::new();
        g.put_object_start().unwrap();
        g.put_string().unwrap();
        let err = g.put_number().unwrap_err();
        assert_eq!(err.to_string(), "Expecting ':'");
    }

    #[test]
    fn two_top_level_values_are_rejected() {
        let mut g = GrammarAnalyzer::new();
        g.put_string().unwrap();
        let err = g.put_string().unwrap_err();
        assert_eq!(err.to_string(), "Expecting EOF");
    }

    #[test]
    fn mismatched_close_is_rejected() {
        let mut g = GrammarAnalyzer::new();
        g.put_list_start().unwrap();
        assert!(g.put_object_end().is_err());
    }

    #[test]
    fn failure_is_terminal() {
        let mut g = GrammarAnalyzer::new();
        g.put_number().unwrap();
        assert!(g.put_number().is_err());
        assert!(g.put_object_start().is_err());
        assert!(g.put_comma().is_err());
    }

    #[test]
    fn deep_nesting_grows_the_stack() {
        let mut g = GrammarAnalyzer::new();
        for _ in 0..64 {
            g.put_list_start().unwrap();
        }
        g.put_number().unwrap();
        for _ in 0..64 {
            g.put_list_end().unwrap();
        }
        assert!(g.is_finished());
    }
}
