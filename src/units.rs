// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The units module contains the length conversion factors and the `Unit`
//! selector used to scale a distance into kilometres or statute miles.

use crate::Metres;

/// The length of a statute mile in kilometres.
pub const MILES_TO_KILOMETRES: f64 = 1.609_344;

/// The number of metres in a kilometre.
pub const METRES_PER_KILOMETRE: f64 = 1000.0;

/// The unit of a calculated distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Kilometres.
    #[default]
    SI,
    /// Statute miles.
    US,
}

impl Unit {
    /// The factor to multiply a distance in kilometres by to convert it
    /// to this `Unit`.
    /// # Examples
    /// ```
    /// use orthodromic::Unit;
    ///
    /// assert_eq!(1.0, Unit::SI.scale());
    /// assert_eq!(1.0 / 1.609_344, Unit::US.scale());
    /// ```
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::SI => 1.0,
            Self::US => 1.0 / MILES_TO_KILOMETRES,
        }
    }

    /// Convert a distance in kilometres to this `Unit`.
    /// * `kilometres` - the distance in kilometres.
    #[must_use]
    pub fn from_kilometres(self, kilometres: f64) -> f64 {
        kilometres * self.scale()
    }

    /// Convert a length in `Metres` to this `Unit`.
    /// * `length` - the length in `Metres`.
    #[must_use]
    pub fn from_metres(self, length: Metres) -> f64 {
        self.from_kilometres(length.0 / METRES_PER_KILOMETRE)
    }
}
