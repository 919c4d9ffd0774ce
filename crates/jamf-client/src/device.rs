use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// A mobile device registered on the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MobileDevice {
    /// Device identifier.
    ///
    /// A missing identifier is decoded as `0`.
    #[serde(default)]
    pub id: u64,
    /// Device display name.
    #[serde(default)]
    pub name: String,
}

impl MobileDevice {
    /// Creates a [`MobileDevice`].
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for MobileDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// The devices contained in a [`MobileDeviceGroup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MobileDevices {
    /// Number of devices, as declared by the server.
    #[serde(default)]
    pub size: usize,
    /// Devices, in document order.
    #[serde(rename = "mobile_device", default)]
    pub devices: Vec<MobileDevice>,
}

/// A mobile device group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename = "mobile_device_group")]
pub struct MobileDeviceGroup {
    /// Group identifier.
    #[serde(default)]
    pub id: u64,
    /// Group name.
    #[serde(default)]
    pub name: String,
    /// Group devices.
    #[serde(default)]
    pub mobile_devices: MobileDevices,
}

impl MobileDeviceGroup {
    /// Consumes the group, returning its devices.
    #[must_use]
    #[inline]
    pub fn into_devices(self) -> Vec<MobileDevice> {
        self.mobile_devices.devices
    }

    pub(crate) fn from_xml(body: &str) -> Result<Self> {
        quick_xml::de::from_str(body).map_err(|e| {
            Error::new(
                ErrorKind::XmlResponse,
                format!("Mobile device group is not valid: {e}"),
            )
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::error::ErrorKind;

    use super::{MobileDevice, MobileDeviceGroup, MobileDevices};

    pub(crate) fn group_xml(id: u64, devices: &[MobileDevice]) -> String {
        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <mobile_device_group><id>{id}</id><name>Classroom</name>\
             <is_smart>false</is_smart>\
             <mobile_devices><size>{}</size>",
            devices.len()
        );
        for device in devices {
            xml.push_str(&format!(
                "<mobile_device><id>{}</id><name>{}</name>\
                 <udid>00000000-0000-0000-0000-00000000000{}</udid></mobile_device>",
                device.id, device.name, device.id
            ));
        }
        xml.push_str("</mobile_devices></mobile_device_group>");
        xml
    }

    #[test]
    fn device_display() {
        assert_eq!(MobileDevice::new(1, "x").to_string(), "1 - x");
    }

    #[test]
    fn group_in_document_order() {
        let devices = vec![
            MobileDevice::new(7, "iPad 7"),
            MobileDevice::new(3, "iPad 3"),
            MobileDevice::new(5, "iPad 5"),
        ];

        let group = MobileDeviceGroup::from_xml(&group_xml(42, &devices)).unwrap();

        assert_eq!(
            group,
            MobileDeviceGroup {
                id: 42,
                name: "Classroom".into(),
                mobile_devices: MobileDevices {
                    size: 3,
                    devices: devices.clone(),
                },
            }
        );
        assert_eq!(group.into_devices(), devices);
    }

    #[test]
    fn single_device_group() {
        let devices = vec![MobileDevice::new(1, "x")];

        let group = MobileDeviceGroup::from_xml(&group_xml(1, &devices)).unwrap();

        assert_eq!(group.into_devices(), devices);
    }

    #[test]
    fn empty_group() {
        let group = MobileDeviceGroup::from_xml(&group_xml(9, &[])).unwrap();

        assert_eq!(group.mobile_devices.size, 0);
        assert!(group.into_devices().is_empty());

        // The `mobile_devices` element may be missing entirely.
        let group = MobileDeviceGroup::from_xml(
            "<mobile_device_group><id>9</id></mobile_device_group>",
        )
        .unwrap();

        assert!(group.into_devices().is_empty());
    }

    #[test]
    fn device_without_id() {
        let group = MobileDeviceGroup::from_xml(
            "<mobile_device_group><id>2</id><mobile_devices><size>2</size>\
             <mobile_device><id>5</id><name>iPad 5</name></mobile_device>\
             <mobile_device><name>Unmanaged</name></mobile_device>\
             </mobile_devices></mobile_device_group>",
        )
        .unwrap();

        assert_eq!(
            group.into_devices(),
            vec![MobileDevice::new(5, "iPad 5"), MobileDevice::new(0, "Unmanaged")]
        );
    }

    #[test]
    fn interleaved_devices() {
        let group = MobileDeviceGroup::from_xml(
            "<mobile_device_group><id>4</id><mobile_devices>\
             <mobile_device><id>1</id><name>a</name></mobile_device>\
             <size>3</size>\
             <mobile_device><id>2</id><name>b</name></mobile_device>\
             <mobile_device><id>3</id><name>c</name></mobile_device>\
             </mobile_devices></mobile_device_group>",
        )
        .unwrap();

        assert_eq!(group.mobile_devices.size, 3);
        assert_eq!(
            group.into_devices(),
            vec![
                MobileDevice::new(1, "a"),
                MobileDevice::new(2, "b"),
                MobileDevice::new(3, "c"),
            ]
        );
    }

    #[test]
    fn realistic_group() {
        let group = MobileDeviceGroup::from_xml(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <mobile_device_group><id>11</id><name>Art &amp; Design</name>\
             <is_smart>true</is_smart>\
             <criteria><size>1</size><criterion><name>Model</name>\
             <priority>0</priority><and_or>and</and_or><search_type>like</search_type>\
             <value>iPad</value></criterion></criteria>\
             <site><id>-1</id><name>None</name></site>\
             <mobile_devices><size>1</size><mobile_device><id>21</id>\
             <name>Studio iPad</name><mac_address>AA:BB:CC:DD:EE:FF</mac_address>\
             <serial_number>DMPXXXXXXXXX</serial_number></mobile_device>\
             </mobile_devices></mobile_device_group>",
        )
        .unwrap();

        assert_eq!(group.id, 11);
        assert_eq!(group.name, "Art & Design");
        assert_eq!(group.into_devices(), vec![MobileDevice::new(21, "Studio iPad")]);
    }

    #[test]
    fn malformed_group() {
        // Mismatched closing tag.
        let error =
            MobileDeviceGroup::from_xml("<mobile_device_group><id>1</name></mobile_device_group>")
                .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::XmlResponse);

        // Non-numeric identifier.
        let error = MobileDeviceGroup::from_xml(
            "<mobile_device_group><id>one</id></mobile_device_group>",
        )
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::XmlResponse);
    }
}
