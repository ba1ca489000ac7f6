// Vendored from https://github.com/stm32-rs/stm32-usbd tag v0.6.0
// Original copyright (c) 2021 Matti Virkkunen <mvirkkunen@gmail.com>, Vadim Kaushan <admin@disasm.info>,
// Nicolas Stalder <n@stalder.io>", Jonas Martin <lichtfeind@gmail.com>
// SPDX-License-Identifier: MIT
// SPDX-LIcense-Identifier: Apache 2.0

#![allow(unused_imports)]

mod op_code;
pub use op_code::*;

mod additional_sense_code;
pub use additional_sense_code::*;

mod response_code;
pub use response_code::*;

mod sense_key;
pub use sense_key::*;

mod medium_type;
pub use medium_type::*;

mod page_control;
pub use page_control::*;

mod peripheral_qualifier;
pub use peripheral_qualifier::*;

mod peripheral_device_type;
pub use peripheral_device_type::*;

mod version_descriptor;
pub use version_descriptor::*;

mod target_port_group_support;
pub use target_port_group_support::*;

mod spc_version;
pub use spc_version::*;

mod response_data_format;
pub use response_data_format::*;