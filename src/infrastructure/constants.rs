// Copyright 2025 JiangLong.
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

/// Resource kind
pub const SERVICE_KIND: &str = "Service";

/// Revision naming
pub const MAX_REVISION_NAME_LEN: usize = 63;
pub const REVISION_SERVICE_PREFIX_LEN: usize = 53;
pub const REVISION_COUNTER_WIDTH: usize = 4;
pub const REVISION_SUFFIX_LEN: usize = 3;
pub const REVISION_NAME_SEPARATOR: char = '-';

/// Environment variable input format
pub const ENV_PAIR_SEPARATOR: char = ',';
pub const ENV_KEY_VALUE_SEPARATOR: char = '=';

/// Environment variable naming the default service configuration file
pub const CONFIG_FILE_ENV: &str = "SERVICE_REVISION_CONFIG";
