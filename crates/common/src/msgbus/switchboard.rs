// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Well-known endpoint names for the built-in system components.

use ustr::Ustr;

/// A namespace of the fully-qualified endpoint names addressed by the core components.
#[derive(Copy, Clone, Debug)]
pub struct MessagingSwitchboard;

impl MessagingSwitchboard {
    #[must_use]
    pub fn data_engine_execute() -> Ustr {
        Ustr::from("DataEngine.execute")
    }

    #[must_use]
    pub fn data_engine_process() -> Ustr {
        Ustr::from("DataEngine.process")
    }

    #[must_use]
    pub fn exec_engine_execute() -> Ustr {
        Ustr::from("ExecEngine.execute")
    }

    #[must_use]
    pub fn exec_engine_process() -> Ustr {
        Ustr::from("ExecEngine.process")
    }

    #[must_use]
    pub fn risk_engine_execute() -> Ustr {
        Ustr::from("RiskEngine.execute")
    }

    #[must_use]
    pub fn risk_engine_process() -> Ustr {
        Ustr::from("RiskEngine.process")
    }
}
